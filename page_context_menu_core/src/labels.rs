//! Display labels for menu entries, looked up by identifier.

use crate::entry::MenuEntryId;

/// Label lookup for the built-in entries.
///
/// Defaults to English. Individual labels can be replaced with
/// [`MenuLabels::with_label`], or a full translation picked up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLabels {
    select_all: String,
    selected_text_copy: String,
    undo: String,
    copy_image: String,
    inspect_element_at: String,
    cut: String,
    paste: String,
}

impl Default for MenuLabels {
    fn default() -> Self {
        Self {
            select_all: "Select all".to_string(),
            selected_text_copy: "Copy".to_string(),
            undo: "Undo".to_string(),
            copy_image: "Copy image".to_string(),
            inspect_element_at: "Inspect".to_string(),
            cut: "Cut".to_string(),
            paste: "Paste".to_string(),
        }
    }
}

impl MenuLabels {
    /// Simplified Chinese labels.
    pub fn zh_cn() -> Self {
        Self {
            select_all: "全选".to_string(),
            selected_text_copy: "复制".to_string(),
            undo: "撤销".to_string(),
            copy_image: "复制图片".to_string(),
            inspect_element_at: "检查".to_string(),
            cut: "剪切".to_string(),
            paste: "粘贴".to_string(),
        }
    }

    /// Replace the label shown for `id`.
    pub fn with_label(mut self, id: MenuEntryId, label: impl Into<String>) -> Self {
        *self.slot_mut(id) = label.into();
        self
    }

    /// The label shown for `id`.
    pub fn get(&self, id: MenuEntryId) -> &str {
        match id {
            MenuEntryId::SelectAll => &self.select_all,
            MenuEntryId::SelectedTextCopy => &self.selected_text_copy,
            MenuEntryId::Undo => &self.undo,
            MenuEntryId::CopyImage => &self.copy_image,
            MenuEntryId::InspectElementAt => &self.inspect_element_at,
            MenuEntryId::Cut => &self.cut,
            MenuEntryId::Paste => &self.paste,
        }
    }

    fn slot_mut(&mut self, id: MenuEntryId) -> &mut String {
        match id {
            MenuEntryId::SelectAll => &mut self.select_all,
            MenuEntryId::SelectedTextCopy => &mut self.selected_text_copy,
            MenuEntryId::Undo => &mut self.undo,
            MenuEntryId::CopyImage => &mut self.copy_image,
            MenuEntryId::InspectElementAt => &mut self.inspect_element_at,
            MenuEntryId::Cut => &mut self.cut,
            MenuEntryId::Paste => &mut self.paste,
        }
    }
}
