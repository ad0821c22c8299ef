//! The windowing capability a controller needs to show a native popup menu.

use std::fmt;

use dpi::PhysicalPosition;

use crate::attributes::{ContextMenuAttributes, TrackOptions};
use crate::error::Result;
use crate::registry::AnchorRegistry;

/// Identifier of an anchor window.
///
/// On Windows this is the window handle; other hosts hand out their own numbers.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnchorId(usize);

impl AnchorId {
    /// Convert the `AnchorId` into the underlying integer.
    ///
    /// This is useful if you need to pass the ID across an FFI boundary.
    pub const fn into_raw(self) -> usize {
        self.0
    }

    /// Construct an `AnchorId` from the underlying integer.
    pub const fn from_raw(id: usize) -> Self {
        Self(id)
    }
}

impl fmt::Debug for AnchorId {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(fmtr)
    }
}

/// Native popup menu support.
///
/// Every method takes `&self`: [`MenuHost::track`] runs a nested message loop,
/// and messages delivered during it reach the controller through the host's
/// [`AnchorRegistry`].
pub trait MenuHost {
    /// Handle to a native popup menu.
    type Menu;

    /// Registry used to route anchor window messages back to their controller.
    fn registry(&self) -> &AnchorRegistry;

    /// Create the invisible anchor window that owns tracked menus.
    fn create_anchor(&self, attributes: &ContextMenuAttributes) -> Result<AnchorId>;

    /// Destroy an anchor window.
    fn destroy_anchor(&self, anchor: AnchorId);

    /// Current pointer position, translated into the anchor's coordinate space.
    fn cursor_position(&self, anchor: AnchorId) -> Result<PhysicalPosition<i32>>;

    /// Create an empty popup menu.
    fn create_menu(&self) -> Result<Self::Menu>;

    /// Append a text item tagged with `raw_id`.
    fn append_item(&self, menu: &Self::Menu, raw_id: u32, label: &str) -> Result<()>;

    /// Destroy a popup menu.
    fn destroy_menu(&self, menu: Self::Menu);

    /// Raise the anchor to top-most z-order without moving, sizing or activating it.
    fn bring_to_front(&self, anchor: AnchorId) -> Result<()>;

    /// Display `menu` at `position` and block until it is dismissed.
    ///
    /// A selection is delivered to the anchor as [`AnchorMessage::Command`](crate::AnchorMessage::Command),
    /// not returned.
    fn track(
        &self,
        menu: &Self::Menu,
        anchor: AnchorId,
        position: PhysicalPosition<i32>,
        options: &TrackOptions,
    ) -> Result<()>;
}

impl<H: MenuHost + ?Sized> MenuHost for std::rc::Rc<H> {
    type Menu = H::Menu;

    fn registry(&self) -> &AnchorRegistry {
        (**self).registry()
    }

    fn create_anchor(&self, attributes: &ContextMenuAttributes) -> Result<AnchorId> {
        (**self).create_anchor(attributes)
    }

    fn destroy_anchor(&self, anchor: AnchorId) {
        (**self).destroy_anchor(anchor)
    }

    fn cursor_position(&self, anchor: AnchorId) -> Result<PhysicalPosition<i32>> {
        (**self).cursor_position(anchor)
    }

    fn create_menu(&self) -> Result<Self::Menu> {
        (**self).create_menu()
    }

    fn append_item(&self, menu: &Self::Menu, raw_id: u32, label: &str) -> Result<()> {
        (**self).append_item(menu, raw_id, label)
    }

    fn destroy_menu(&self, menu: Self::Menu) {
        (**self).destroy_menu(menu)
    }

    fn bring_to_front(&self, anchor: AnchorId) -> Result<()> {
        (**self).bring_to_front(anchor)
    }

    fn track(
        &self,
        menu: &Self::Menu,
        anchor: AnchorId,
        position: PhysicalPosition<i32>,
        options: &TrackOptions,
    ) -> Result<()> {
        (**self).track(menu, anchor, position, options)
    }
}
