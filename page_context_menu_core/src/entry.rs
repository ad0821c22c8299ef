//! The fixed table of context menu entries and the rules that pick them.

use crate::labels::MenuLabels;
use crate::snapshot::ContextSnapshot;

/// Identifier of one of the built-in context menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuEntryId {
    /// Select everything in the focused frame.
    SelectAll,
    /// Copy the selected text.
    SelectedTextCopy,
    /// Undo the last edit in the focused frame.
    Undo,
    /// Copy the image under the pointer.
    CopyImage,
    /// Open the element under the pointer in the attached developer tools.
    InspectElementAt,
    /// Cut the selection in the focused frame.
    Cut,
    /// Paste into the focused frame.
    Paste,
}

impl MenuEntryId {
    /// Every identifier, in on-screen order.
    pub const ALL: [MenuEntryId; 7] = [
        MenuEntryId::SelectedTextCopy,
        MenuEntryId::CopyImage,
        MenuEntryId::InspectElementAt,
        MenuEntryId::Cut,
        MenuEntryId::Paste,
        MenuEntryId::SelectAll,
        MenuEntryId::Undo,
    ];

    /// The numeric id carried by native menu items and command messages.
    ///
    /// Native ids start at 1, since 0 means "nothing selected".
    pub const fn to_raw(self) -> u32 {
        match self {
            MenuEntryId::SelectAll => 1,
            MenuEntryId::SelectedTextCopy => 2,
            MenuEntryId::Undo => 3,
            MenuEntryId::CopyImage => 4,
            MenuEntryId::InspectElementAt => 5,
            MenuEntryId::Cut => 6,
            MenuEntryId::Paste => 7,
        }
    }

    /// Decode a numeric id from a command message.
    pub const fn from_raw(raw: u32) -> Option<Self> {
        Some(match raw {
            1 => MenuEntryId::SelectAll,
            2 => MenuEntryId::SelectedTextCopy,
            3 => MenuEntryId::Undo,
            4 => MenuEntryId::CopyImage,
            5 => MenuEntryId::InspectElementAt,
            6 => MenuEntryId::Cut,
            7 => MenuEntryId::Paste,
            _ => return None,
        })
    }

    /// The editing command this entry runs on the focused frame, if it is one.
    pub const fn edit_command(self) -> Option<EditCommand> {
        match self {
            MenuEntryId::SelectedTextCopy => Some(EditCommand::Copy),
            MenuEntryId::SelectAll => Some(EditCommand::SelectAll),
            MenuEntryId::Undo => Some(EditCommand::Undo),
            MenuEntryId::Cut => Some(EditCommand::Cut),
            MenuEntryId::Paste => Some(EditCommand::Paste),
            MenuEntryId::CopyImage | MenuEntryId::InspectElementAt => None,
        }
    }
}

/// A named editing command understood by the focused frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditCommand {
    Copy,
    SelectAll,
    Undo,
    Cut,
    Paste,
}

impl EditCommand {
    /// The command name passed to the frame.
    pub const fn as_str(self) -> &'static str {
        match self {
            EditCommand::Copy => "Copy",
            EditCommand::SelectAll => "SelectAll",
            EditCommand::Undo => "Undo",
            EditCommand::Cut => "Cut",
            EditCommand::Paste => "Paste",
        }
    }
}

/// Host flags consulted when the menu is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostState {
    /// Whether a developer-tools session is attached to the page.
    pub devtools_connected: bool,
}

/// An entry chosen for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: MenuEntryId,
    pub label: String,
}

type Predicate = fn(&ContextSnapshot, &HostState) -> bool;

fn has_text(snapshot: &ContextSnapshot, _: &HostState) -> bool {
    snapshot.has_selected_text()
}

fn has_image(snapshot: &ContextSnapshot, _: &HostState) -> bool {
    snapshot.has_image()
}

fn devtools(_: &ContextSnapshot, host: &HostState) -> bool {
    host.devtools_connected
}

fn editable(snapshot: &ContextSnapshot, _: &HostState) -> bool {
    snapshot.is_editable
}

// Order here is the on-screen order.
const ENTRY_TABLE: [(MenuEntryId, Predicate); 7] = [
    (MenuEntryId::SelectedTextCopy, has_text),
    (MenuEntryId::CopyImage, has_image),
    (MenuEntryId::InspectElementAt, devtools),
    (MenuEntryId::Cut, editable),
    (MenuEntryId::Paste, editable),
    (MenuEntryId::SelectAll, editable),
    (MenuEntryId::Undo, editable),
];

/// Pick the entries that apply to `snapshot`, in display order.
pub fn synthesize(
    snapshot: &ContextSnapshot,
    host: &HostState,
    labels: &MenuLabels,
) -> Vec<MenuEntry> {
    ENTRY_TABLE
        .iter()
        .filter(|(_, applies)| applies(snapshot, host))
        .map(|(id, _)| MenuEntry {
            id: *id,
            label: labels.get(*id).to_owned(),
        })
        .collect()
}
