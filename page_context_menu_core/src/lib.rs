//! Context menu synthesis and dispatch for an embedded page host.
//!
//! A [`ContextMenuController`] turns a [`ContextSnapshot`] into a native popup
//! menu through a [`MenuHost`], and runs the chosen entry against a
//! [`ContentSurface`].

pub mod attributes;
pub mod controller;
pub mod entry;
pub mod error;
pub mod host;
pub mod labels;
pub mod registry;
pub mod snapshot;
pub mod surface;

#[cfg(feature = "headless")]
pub mod headless;

pub use dpi;

pub use attributes::{
    ContextMenuAttributes, HorizontalAlignment, MenuLayout, TrackButton, TrackOptions,
    VerticalAlignment,
};
pub use controller::{ContextMenuController, MenuState};
pub use entry::{EditCommand, HostState, MenuEntry, MenuEntryId, synthesize};
pub use error::{Error, Result};
pub use host::{AnchorId, MenuHost};
pub use labels::MenuLabels;
pub use registry::{AnchorMessage, AnchorRegistry, MessageSink};
pub use snapshot::ContextSnapshot;
pub use surface::{CommandTarget, ContentSurface};

#[cfg(feature = "headless")]
pub use headless::{HeadlessMenu, HeadlessMenuHost, TrackedMenu};
