//! Native popup menu calls.

use std::io;

use dpi::PhysicalPosition;
use page_context_menu_core::{
    AnchorId, Error, HorizontalAlignment, MenuLayout, Result, TrackButton, TrackOptions,
    VerticalAlignment,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, DestroyMenu, HMENU, MF_STRING, TPM_BOTTOMALIGN,
    TPM_CENTERALIGN, TPM_HORIZONTAL, TPM_HORPOSANIMATION, TPM_LEFTALIGN, TPM_LEFTBUTTON,
    TPM_NOANIMATION, TPM_RIGHTALIGN, TPM_RIGHTBUTTON, TPM_TOPALIGN, TPM_VCENTERALIGN,
    TPM_VERPOSANIMATION, TPM_VERTICAL, TRACK_POPUP_MENU_FLAGS, TrackPopupMenuEx,
};

use crate::anchor::hwnd_of;
use crate::util::{self, encode_wide};

/// An owned `HMENU`.
#[derive(Debug)]
pub struct PopupMenu(HMENU);

pub(crate) fn create() -> Result<PopupMenu> {
    let hmenu = unsafe { CreatePopupMenu() };
    if hmenu.is_null() {
        return Err(Error::MenuCreation(io::Error::last_os_error()));
    }
    Ok(PopupMenu(hmenu))
}

pub(crate) fn append(menu: &PopupMenu, raw_id: u32, label: &str) -> Result<()> {
    let label = encode_wide(label);
    if unsafe { AppendMenuW(menu.0, MF_STRING, raw_id as usize, label.as_ptr()) } == 0 {
        return Err(Error::AppendItem {
            raw_id,
            source: io::Error::last_os_error(),
        });
    }
    Ok(())
}

pub(crate) fn destroy(menu: PopupMenu) {
    unsafe { DestroyMenu(menu.0) };
}

pub(crate) fn track_flags(options: &TrackOptions) -> TRACK_POPUP_MENU_FLAGS {
    let button = match options.button {
        TrackButton::Left => TPM_LEFTBUTTON,
        TrackButton::Right => TPM_RIGHTBUTTON,
    };
    let vertical = match options.vertical {
        VerticalAlignment::Top => TPM_TOPALIGN,
        VerticalAlignment::Center => TPM_VCENTERALIGN,
        VerticalAlignment::Bottom => TPM_BOTTOMALIGN,
    };
    let horizontal = match options.horizontal {
        HorizontalAlignment::Left => TPM_LEFTALIGN,
        HorizontalAlignment::Center => TPM_CENTERALIGN,
        HorizontalAlignment::Right => TPM_RIGHTALIGN,
    };
    let layout = match options.layout {
        MenuLayout::Horizontal => TPM_HORIZONTAL,
        MenuLayout::Vertical => TPM_VERTICAL,
    };
    let animation = if options.animate {
        TPM_HORPOSANIMATION | TPM_VERPOSANIMATION
    } else {
        TPM_NOANIMATION
    };
    button | vertical | horizontal | layout | animation
}

/// Display `menu` and block until it closes.
///
/// Without `TPM_RETURNCMD` the selection is posted to the owner as `WM_COMMAND`.
pub(crate) fn track(
    menu: &PopupMenu,
    anchor: AnchorId,
    position: PhysicalPosition<i32>,
    options: &TrackOptions,
) -> Result<()> {
    let flags = track_flags(options);
    let hwnd = hwnd_of(anchor);
    util::check_bool(|| unsafe {
        TrackPopupMenuEx(menu.0, flags, position.x, position.y, hwnd, std::ptr::null())
    })
    .map_err(Error::Track)
}
