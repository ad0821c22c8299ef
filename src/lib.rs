pub use page_context_menu_core::*;

#[cfg(any(target_os = "windows", feature = "headless"))]
mod context_menu;
#[cfg(any(target_os = "windows", feature = "headless"))]
pub use context_menu::{NativeMenuHost, native_controller};
