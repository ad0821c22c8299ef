use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use dpi::PhysicalPosition;
use page_context_menu_core::{
    AnchorId, AnchorRegistry, ContextMenuAttributes, Error, MenuHost, Result, TrackOptions,
};
use tracing::debug;
use windows_sys::Win32::{
    Foundation::POINT,
    Graphics::Gdi::ScreenToClient,
    UI::WindowsAndMessaging::{
        GetCursorPos, HWND_TOPMOST, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOREPOSITION, SWP_NOSIZE,
        SetWindowPos,
    },
};

use crate::anchor::{self, hwnd_of};
use crate::menu::{self, PopupMenu};
use crate::util::{self, encode_wide};

/// Menu host backed by Win32 popup menus.
///
/// Selections arrive as `WM_COMMAND` on the anchor window once the tracking
/// call returns, so the thread must keep pumping messages (a winit event loop
/// does) for commands to reach the controller.
#[derive(Debug, Default)]
pub struct WindowsMenuHost {
    registry: Rc<AnchorRegistry>,
    // Wide class names that have been registered by this host.
    registered_classes: RefCell<Vec<Vec<u16>>>,
}

impl WindowsMenuHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_class(&self, class_name: &[u16]) -> Result<()> {
        if self
            .registered_classes
            .borrow()
            .iter()
            .any(|registered| registered == class_name)
        {
            return Ok(());
        }
        anchor::register_class(class_name)?;
        self.registered_classes.borrow_mut().push(class_name.to_vec());
        Ok(())
    }
}

impl MenuHost for WindowsMenuHost {
    type Menu = PopupMenu;

    fn registry(&self) -> &AnchorRegistry {
        &self.registry
    }

    fn create_anchor(&self, attributes: &ContextMenuAttributes) -> Result<AnchorId> {
        let class_name = encode_wide(&attributes.class_name);
        self.ensure_class(&class_name)?;
        anchor::create_anchor(
            &class_name,
            attributes.anchor_size.width as i32,
            attributes.anchor_size.height as i32,
            &self.registry,
        )
    }

    fn destroy_anchor(&self, anchor: AnchorId) {
        anchor::destroy_anchor(anchor);
    }

    fn cursor_position(&self, anchor: AnchorId) -> Result<PhysicalPosition<i32>> {
        let mut point = POINT { x: 0, y: 0 };
        if unsafe { GetCursorPos(&mut point) } == 0 {
            return Err(Error::Cursor(io::Error::last_os_error()));
        }
        if unsafe { ScreenToClient(hwnd_of(anchor), &mut point) } == 0 {
            return Err(Error::Cursor(io::Error::last_os_error()));
        }
        Ok(PhysicalPosition::new(point.x, point.y))
    }

    fn create_menu(&self) -> Result<PopupMenu> {
        menu::create()
    }

    fn append_item(&self, menu: &PopupMenu, raw_id: u32, label: &str) -> Result<()> {
        menu::append(menu, raw_id, label)
    }

    fn destroy_menu(&self, menu: PopupMenu) {
        menu::destroy(menu);
    }

    fn bring_to_front(&self, anchor: AnchorId) -> Result<()> {
        util::check_bool(|| unsafe {
            SetWindowPos(
                hwnd_of(anchor),
                HWND_TOPMOST,
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOREPOSITION | SWP_NOACTIVATE,
            )
        })
        .map_err(Error::BringToFront)
    }

    fn track(
        &self,
        menu: &PopupMenu,
        anchor: AnchorId,
        position: PhysicalPosition<i32>,
        options: &TrackOptions,
    ) -> Result<()> {
        debug!(?anchor, ?position, "tracking popup menu");
        menu::track(menu, anchor, position, options)
    }
}
