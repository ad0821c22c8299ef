use std::rc::{Rc, Weak};

use page_context_menu_core::{ContentSurface, ContextMenuAttributes, ContextMenuController};

/// The menu host for the current platform.
///
/// Windows uses native popup menus. Elsewhere menus are headless: they are
/// built and recorded, but nothing is displayed.
#[cfg(target_os = "windows")]
pub type NativeMenuHost = page_context_menu_windows::WindowsMenuHost;

/// The menu host for the current platform.
///
/// Windows uses native popup menus. Elsewhere menus are headless: they are
/// built and recorded, but nothing is displayed.
#[cfg(not(target_os = "windows"))]
pub type NativeMenuHost = page_context_menu_core::HeadlessMenuHost;

/// Create a context menu controller for `surface` on the platform menu host.
///
/// # Example
///
/// ```ignore
/// use page_context_menu::{ContextMenuAttributes, ContextSnapshot, native_controller};
///
/// let controller = native_controller(Rc::downgrade(&page), ContextMenuAttributes::default());
///
/// let snapshot = ContextSnapshot::at(position).with_selected_text("hello");
/// if !controller.show(&snapshot) {
///     tracing::debug!("no context menu for this target");
/// }
/// ```
pub fn native_controller<S: ContentSurface + 'static>(
    surface: Weak<S>,
    attributes: ContextMenuAttributes,
) -> Rc<ContextMenuController<NativeMenuHost, S>> {
    tracing::debug!(class_name = %attributes.class_name, "creating context menu controller");
    ContextMenuController::new(NativeMenuHost::new(), surface, attributes)
}
