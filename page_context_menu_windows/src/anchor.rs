//! The hidden window that owns tracked menus and receives their commands.

use std::io;
use std::ptr;
use std::rc::Rc;

use page_context_menu_core::{AnchorId, AnchorMessage, AnchorRegistry, Error, Result};
use tracing::{debug, trace};
use windows_sys::Win32::{
    Foundation::{ERROR_CLASS_ALREADY_EXISTS, HWND, LPARAM, LRESULT, WPARAM},
    Graphics::Gdi::{BeginPaint, EndPaint, PAINTSTRUCT},
    UI::WindowsAndMessaging::{
        CREATESTRUCTW, CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, CreateWindowExW, DefWindowProcW,
        DestroyWindow, GWL_USERDATA, RegisterClassExW, WM_CLOSE, WM_COMMAND, WM_NCCREATE,
        WM_NCDESTROY, WM_PAINT, WNDCLASSEXW, WS_EX_TOOLWINDOW, WS_POPUP,
    },
};

use crate::util;

pub(crate) fn hwnd_of(anchor: AnchorId) -> HWND {
    anchor.into_raw() as HWND
}

pub(crate) fn anchor_of(hwnd: HWND) -> AnchorId {
    AnchorId::from_raw(hwnd as usize)
}

/// Register the anchor window class.
///
/// Registering a class that already exists is not an error.
pub(crate) fn register_class(class_name: &[u16]) -> Result<()> {
    let class = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(anchor_window_callback),
        cbClsExtra: 0,
        cbWndExtra: 0,
        hInstance: util::get_instance_handle(),
        hIcon: ptr::null_mut(),
        hCursor: ptr::null_mut(),
        hbrBackground: ptr::null_mut(),
        lpszMenuName: ptr::null(),
        lpszClassName: class_name.as_ptr(),
        hIconSm: ptr::null_mut(),
    };

    if unsafe { RegisterClassExW(&class) } != 0 {
        return Ok(());
    }

    let err = io::Error::last_os_error();
    if err.raw_os_error() == Some(ERROR_CLASS_ALREADY_EXISTS as i32) {
        return Ok(());
    }
    Err(Error::ClassRegistration {
        class_name: String::from_utf16_lossy(class_name.strip_suffix(&[0u16]).unwrap_or(class_name)),
        source: err,
    })
}

/// Create an invisible tool window whose messages are routed through `registry`.
pub(crate) fn create_anchor(
    class_name: &[u16],
    width: i32,
    height: i32,
    registry: &Rc<AnchorRegistry>,
) -> Result<AnchorId> {
    // The window procedure takes its own reference to the registry on
    // WM_NCCREATE and releases it on WM_NCDESTROY.
    let registry_ptr = Rc::as_ptr(registry);

    let hwnd = unsafe {
        CreateWindowExW(
            WS_EX_TOOLWINDOW,
            class_name.as_ptr(),
            class_name.as_ptr(),
            WS_POPUP,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            width,
            height,
            ptr::null_mut(),
            ptr::null_mut(),
            util::get_instance_handle(),
            registry_ptr as *const _,
        )
    };

    if hwnd.is_null() {
        return Err(Error::AnchorCreation(io::Error::last_os_error()));
    }

    debug!(hwnd = hwnd as usize, "created anchor window");
    Ok(anchor_of(hwnd))
}

pub(crate) fn destroy_anchor(anchor: AnchorId) {
    let hwnd = hwnd_of(anchor);
    if unsafe { DestroyWindow(hwnd) } == 0 {
        debug!(
            hwnd = hwnd as usize,
            err = %io::Error::last_os_error(),
            "failed to destroy anchor window"
        );
    }
}

/// Window callback for anchor windows.
unsafe extern "system" fn anchor_window_callback(
    window: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let userdata = unsafe { util::get_window_long(window, GWL_USERDATA) };

    match (userdata, msg) {
        (0, WM_NCCREATE) => {
            let createstruct = unsafe { &*(lparam as *const CREATESTRUCTW) };
            let registry = createstruct.lpCreateParams as *const AnchorRegistry;
            if !registry.is_null() {
                unsafe {
                    Rc::increment_strong_count(registry);
                    util::set_window_long(window, GWL_USERDATA, registry as isize);
                }
            }
            return unsafe { DefWindowProcW(window, msg, wparam, lparam) };
        }
        (0, _) => return unsafe { DefWindowProcW(window, msg, wparam, lparam) },
        (_, WM_NCDESTROY) => {
            unsafe {
                util::set_window_long(window, GWL_USERDATA, 0);
                drop(Rc::from_raw(userdata as *const AnchorRegistry));
            }
            return unsafe { DefWindowProcW(window, msg, wparam, lparam) };
        }
        _ => {}
    }

    // Hold a reference for the duration of the call; the sink may destroy
    // this window while handling the message.
    let registry = unsafe {
        let ptr = userdata as *const AnchorRegistry;
        Rc::increment_strong_count(ptr);
        Rc::from_raw(ptr)
    };
    let anchor = anchor_of(window);

    match msg {
        WM_COMMAND => {
            let raw = (wparam & 0xFFFF) as u32;
            trace!(raw, "anchor received menu command");
            registry.dispatch(anchor, AnchorMessage::Command(raw));
            0
        }
        WM_PAINT => {
            let mut paint: PAINTSTRUCT = unsafe { std::mem::zeroed() };
            unsafe { BeginPaint(window, &mut paint) };
            registry.dispatch(anchor, AnchorMessage::Paint);
            unsafe { EndPaint(window, &paint) };
            0
        }
        // Closing would destroy the anchor under its controller.
        WM_CLOSE => {
            registry.dispatch(anchor, AnchorMessage::Close);
            0
        }
        _ => unsafe { DefWindowProcW(window, msg, wparam, lparam) },
    }
}
