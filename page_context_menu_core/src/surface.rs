//! The hosted page the controller sends commands to.

use std::rc::Rc;

use dpi::PhysicalPosition;

/// A frame that accepts named editing commands.
pub trait CommandTarget {
    /// Run a named editing command such as `"Copy"` or `"Paste"`.
    fn execute_command(&self, name: &str);
}

/// The content surface that owns focus, editing and developer tools state.
pub trait ContentSurface {
    /// Whether a developer-tools session is attached.
    fn is_devtools_connected(&self) -> bool;

    /// The frame that currently receives editing commands.
    fn focused_frame(&self) -> Option<Rc<dyn CommandTarget>>;

    /// Copy the image located at `position` to the clipboard.
    fn copy_image_at(&self, position: PhysicalPosition<i32>);

    /// Reveal the element at (`x`, `y`) in the developer tools.
    fn inspect_element_at(&self, x: i32, y: i32);

    /// Process input queued on the host event thread before a command runs.
    fn drain_pending_input(&self);
}
