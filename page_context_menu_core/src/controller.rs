//! Builds the context menu for a snapshot, tracks it, and turns the chosen
//! entry into a command on the content surface.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use dpi::PhysicalPosition;
use tracing::{debug, trace, warn};

use crate::attributes::ContextMenuAttributes;
use crate::entry::{HostState, MenuEntry, MenuEntryId, synthesize};
use crate::error::{Error, Result};
use crate::host::{AnchorId, MenuHost};
use crate::registry::{AnchorMessage, MessageSink};
use crate::snapshot::ContextSnapshot;
use crate::surface::ContentSurface;

/// Whether a menu is currently being tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Idle,
    MenuOpen,
}

/// Context menu controller for one content surface.
///
/// Owns a hidden anchor window, at most one native menu, the snapshot that
/// produced that menu and the position of the image it can copy.
pub struct ContextMenuController<H: MenuHost, S: ContentSurface> {
    host: H,
    surface: Weak<S>,
    attributes: ContextMenuAttributes,
    this: Weak<Self>,
    anchor: Cell<Option<AnchorId>>,
    menu: RefCell<Option<H::Menu>>,
    entries: RefCell<Vec<MenuEntry>>,
    last_snapshot: RefCell<Option<ContextSnapshot>>,
    image_position: Cell<Option<PhysicalPosition<i32>>>,
    state: Cell<MenuState>,
}

impl<H: MenuHost, S: ContentSurface> fmt::Debug for ContextMenuController<H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextMenuController")
            .field("anchor", &self.anchor.get())
            .field("state", &self.state.get())
            .field("entries", &self.entries.borrow())
            .field("image_position", &self.image_position.get())
            .finish_non_exhaustive()
    }
}

impl<H, S> ContextMenuController<H, S>
where
    H: MenuHost + 'static,
    S: ContentSurface + 'static,
{
    /// Create a controller commanding `surface` and create its anchor window.
    ///
    /// If the anchor cannot be created now, the next [`show`](Self::show) tries again.
    pub fn new(host: H, surface: Weak<S>, attributes: ContextMenuAttributes) -> Rc<Self> {
        let controller = Rc::new_cyclic(|this| Self {
            host,
            surface,
            attributes,
            this: this.clone(),
            anchor: Cell::new(None),
            menu: RefCell::new(None),
            entries: RefCell::new(Vec::new()),
            last_snapshot: RefCell::new(None),
            image_position: Cell::new(None),
            state: Cell::new(MenuState::Idle),
        });
        controller.init();
        controller
    }

    /// Create the anchor window if it does not exist yet.
    ///
    /// Returns whether an anchor window is available.
    pub fn init(&self) -> bool {
        if self.anchor.get().is_some() {
            return true;
        }

        match self.host.create_anchor(&self.attributes) {
            Ok(anchor) => {
                let sink: Weak<dyn MessageSink> = self.this.clone();
                self.host.registry().register(anchor, sink);
                self.anchor.set(Some(anchor));
                debug!(?anchor, "created context menu anchor");
                true
            }
            Err(err) => {
                warn!(
                    %err,
                    cause = ?std::error::Error::source(&err),
                    "failed to create context menu anchor"
                );
                false
            }
        }
    }

    /// Show the context menu for `snapshot` at the pointer and wait for the user.
    ///
    /// Blocks until the menu is dismissed. A chosen entry is dispatched through
    /// [`on_command`](Self::on_command) by the time this returns on hosts that
    /// deliver selections synchronously.
    ///
    /// Returns `false` if nothing was displayed: no entry applied, a native
    /// call failed, or a menu is already open.
    pub fn show(&self, snapshot: &ContextSnapshot) -> bool {
        if self.state.get() == MenuState::MenuOpen {
            warn!("context menu requested while another one is open");
            return false;
        }

        match self.try_show(snapshot) {
            Ok(shown) => shown,
            Err(err) => {
                warn!(
                    %err,
                    cause = ?std::error::Error::source(&err),
                    "context menu not shown"
                );
                false
            }
        }
    }

    fn try_show(&self, snapshot: &ContextSnapshot) -> Result<bool> {
        if !self.init() {
            return Err(Error::NoAnchor);
        }
        let anchor = self.anchor.get().ok_or(Error::NoAnchor)?;

        // The previous menu is superseded even if this one never appears.
        self.release_current();
        let position = self.host.cursor_position(anchor)?;

        let host_state = HostState {
            devtools_connected: self
                .surface
                .upgrade()
                .is_some_and(|surface| surface.is_devtools_connected()),
        };
        let entries = synthesize(snapshot, &host_state, &self.attributes.labels);

        let menu = self.host.create_menu()?;
        for entry in &entries {
            if let Err(err) = self.host.append_item(&menu, entry.id.to_raw(), &entry.label) {
                self.image_position.set(None);
                self.host.destroy_menu(menu);
                return Err(err);
            }
            if entry.id == MenuEntryId::CopyImage {
                self.image_position.set(snapshot.image_position);
            }
        }

        if entries.is_empty() {
            trace!("no context menu entries apply");
            self.host.destroy_menu(menu);
            return Ok(false);
        }

        debug!(
            entries = ?entries.iter().map(|entry| entry.id).collect::<Vec<_>>(),
            ?position,
            "showing context menu"
        );
        *self.menu.borrow_mut() = Some(menu);
        *self.entries.borrow_mut() = entries;
        *self.last_snapshot.borrow_mut() = Some(snapshot.clone());

        if let Err(err) = self.host.bring_to_front(anchor) {
            warn!(
                %err,
                cause = ?std::error::Error::source(&err),
                "failed to raise context menu anchor"
            );
        }

        self.state.set(MenuState::MenuOpen);
        let tracked = match self.menu.borrow().as_ref() {
            Some(menu) => self
                .host
                .track(menu, anchor, position, &self.attributes.track),
            None => Ok(()),
        };
        self.state.set(MenuState::Idle);
        trace!("context menu closed");

        if let Err(err) = tracked {
            self.release_current();
            return Err(err);
        }
        Ok(true)
    }

    fn release_current(&self) {
        self.image_position.set(None);
        let menu = self.menu.borrow_mut().take();
        if let Some(menu) = menu {
            self.host.destroy_menu(menu);
        }
        self.entries.borrow_mut().clear();
        *self.last_snapshot.borrow_mut() = None;
    }
}

impl<H: MenuHost, S: ContentSurface> ContextMenuController<H, S> {
    /// Run the action for the chosen entry against the content surface.
    pub fn on_command(&self, id: MenuEntryId) {
        // Copy image consumes the position whether or not it can run.
        let image_position = match id {
            MenuEntryId::CopyImage => self.image_position.take(),
            _ => None,
        };
        let Some(surface) = self.surface.upgrade() else {
            warn!(?id, "content surface is gone, dropping menu command");
            return;
        };

        surface.drain_pending_input();
        debug!(?id, "running context menu command");

        match id {
            MenuEntryId::CopyImage => match image_position {
                Some(position) => surface.copy_image_at(position),
                None => warn!("copy image chosen without an image position"),
            },
            MenuEntryId::InspectElementAt => {
                let point = self
                    .last_snapshot
                    .borrow()
                    .as_ref()
                    .map(|snapshot| snapshot.mouse_position);
                match point {
                    Some(point) => surface.inspect_element_at(point.x, point.y),
                    None => warn!("inspect chosen without a shown snapshot"),
                }
            }
            _ => {
                let Some(command) = id.edit_command() else {
                    return;
                };
                match surface.focused_frame() {
                    Some(frame) => frame.execute_command(command.as_str()),
                    None => debug!(command = command.as_str(), "no focused frame"),
                }
            }
        }
    }

    /// Whether a menu is being tracked right now.
    pub fn state(&self) -> MenuState {
        self.state.get()
    }

    /// The anchor window, once created.
    pub fn anchor(&self) -> Option<AnchorId> {
        self.anchor.get()
    }

    /// Position of the image the current menu can copy.
    pub fn image_position(&self) -> Option<PhysicalPosition<i32>> {
        self.image_position.get()
    }

    /// The snapshot that produced the current menu.
    pub fn last_snapshot(&self) -> Option<ContextSnapshot> {
        self.last_snapshot.borrow().clone()
    }

    /// Entries of the current menu, in display order.
    pub fn current_entries(&self) -> Vec<MenuEntry> {
        self.entries.borrow().clone()
    }

    /// The configuration this controller was created with.
    pub fn attributes(&self) -> &ContextMenuAttributes {
        &self.attributes
    }
}

impl<H: MenuHost, S: ContentSurface> MessageSink for ContextMenuController<H, S> {
    fn handle_message(&self, message: AnchorMessage) {
        match message {
            AnchorMessage::Command(raw) => match MenuEntryId::from_raw(raw) {
                Some(id) => self.on_command(id),
                None => trace!(raw, "ignoring unknown menu command"),
            },
            // The menu chrome is drawn by the platform.
            AnchorMessage::Paint => {}
            AnchorMessage::Close | AnchorMessage::Other(_) => {}
        }
    }
}

impl<H: MenuHost, S: ContentSurface> Drop for ContextMenuController<H, S> {
    fn drop(&mut self) {
        if let Some(anchor) = self.anchor.take() {
            self.host.registry().unregister(anchor);
            self.host.destroy_anchor(anchor);
            debug!(?anchor, "destroyed context menu anchor");
        }
        if let Some(menu) = self.menu.get_mut().take() {
            self.host.destroy_menu(menu);
        }
        self.entries.get_mut().clear();
        self.image_position.set(None);
    }
}
