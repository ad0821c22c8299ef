//! Win32 [`MenuHost`](page_context_menu_core::MenuHost) built on a hidden tool window
//! and `TrackPopupMenuEx`.

#![cfg(target_os = "windows")]

mod anchor;
mod host;
mod menu;
mod util;

pub use host::WindowsMenuHost;
pub use menu::PopupMenu;
