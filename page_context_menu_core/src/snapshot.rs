//! What was under the pointer when a context menu was requested.

use dpi::PhysicalPosition;

/// Immutable description of the event that triggered a context menu.
///
/// Built once per request and handed to
/// [`ContextMenuController::show`](crate::ContextMenuController::show). The
/// controller keeps a copy only while the menu it produced is the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextSnapshot {
    /// Text selected at the time of the event, if any.
    pub selected_text: Option<String>,
    /// Location of the image under the pointer, if the pointer was over one.
    pub image_position: Option<PhysicalPosition<i32>>,
    /// Whether the event target accepts editing commands.
    pub is_editable: bool,
    /// Pointer position in content coordinates at the time of the event.
    pub mouse_position: PhysicalPosition<i32>,
}

impl ContextSnapshot {
    /// Create an empty snapshot triggered at `position`.
    pub fn at(position: PhysicalPosition<i32>) -> Self {
        Self {
            mouse_position: position,
            ..Self::default()
        }
    }

    /// Set the selected text.
    pub fn with_selected_text(mut self, text: impl Into<String>) -> Self {
        self.selected_text = Some(text.into());
        self
    }

    /// Mark the event as having happened over an image at `position`.
    pub fn with_image_at(mut self, position: PhysicalPosition<i32>) -> Self {
        self.image_position = Some(position);
        self
    }

    /// Set whether the event target is editable.
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.is_editable = editable;
        self
    }

    /// Whether there is non-empty selected text.
    pub fn has_selected_text(&self) -> bool {
        self.selected_text.as_deref().is_some_and(|text| !text.is_empty())
    }

    /// Whether the pointer was over an image.
    pub fn has_image(&self) -> bool {
        self.image_position.is_some()
    }
}
