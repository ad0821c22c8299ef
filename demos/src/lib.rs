//! Shared pieces for the page_context_menu demos.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use page_context_menu::dpi::{PhysicalPosition, PhysicalSize};
use page_context_menu::{CommandTarget, ContentSurface, ContextSnapshot};
use tracing::info;

/// Stand-in for a rendered page: the window is split into an image column,
/// a text column with a selection, and an editable column.
#[derive(Debug, Default)]
pub struct DemoPage {
    devtools: Cell<bool>,
    selection: RefCell<String>,
}

impl DemoPage {
    pub fn new() -> Rc<Self> {
        let page = Self::default();
        *page.selection.borrow_mut() = "selected words".to_string();
        Rc::new(page)
    }

    /// Attach or detach the pretend developer tools.
    pub fn toggle_devtools(&self) -> bool {
        let connected = !self.devtools.get();
        self.devtools.set(connected);
        connected
    }

    /// Describe what lies under `position` in a window of `size`.
    pub fn snapshot_at(
        &self,
        position: PhysicalPosition<i32>,
        size: PhysicalSize<u32>,
    ) -> ContextSnapshot {
        let column = size.width.max(3) as i32 / 3;
        let snapshot = ContextSnapshot::at(position);
        match position.x / column.max(1) {
            0 => snapshot.with_image_at(position),
            1 => snapshot.with_selected_text(self.selection.borrow().clone()),
            _ => snapshot.with_editable(true),
        }
    }
}

struct DemoFrame;

impl CommandTarget for DemoFrame {
    fn execute_command(&self, name: &str) {
        info!(command = name, "focused frame executed command");
    }
}

impl ContentSurface for DemoPage {
    fn is_devtools_connected(&self) -> bool {
        self.devtools.get()
    }

    fn focused_frame(&self) -> Option<Rc<dyn CommandTarget>> {
        Some(Rc::new(DemoFrame))
    }

    fn copy_image_at(&self, position: PhysicalPosition<i32>) {
        info!(x = position.x, y = position.y, "copied image");
    }

    fn inspect_element_at(&self, x: i32, y: i32) {
        info!(x, y, "inspecting element");
    }

    fn drain_pending_input(&self) {}
}

#[cfg(test)]
mod tests {
    use page_context_menu::{HostState, MenuEntryId, MenuLabels, synthesize};

    use super::*;

    #[test]
    fn columns_map_to_targets() {
        let page = DemoPage::new();
        let size = PhysicalSize::new(300, 100);
        let ids = |x| {
            let snapshot = page.snapshot_at(PhysicalPosition::new(x, 10), size);
            synthesize(&snapshot, &HostState::default(), &MenuLabels::default())
                .into_iter()
                .map(|entry| entry.id)
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(10), vec![MenuEntryId::CopyImage]);
        assert_eq!(ids(150), vec![MenuEntryId::SelectedTextCopy]);
        assert_eq!(ids(299).len(), 4);
    }
}
