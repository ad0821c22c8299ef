//! Errors raised by menu hosts.
//!
//! None of these escape [`ContextMenuController::show`](crate::ContextMenuController::show):
//! a native failure only means no popup appears.

use std::io;

/// A native capability the controller needed was unavailable.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The anchor window class could not be registered.
    #[error("failed to register anchor window class `{class_name}`")]
    ClassRegistration {
        class_name: String,
        #[source]
        source: io::Error,
    },

    /// The hidden anchor window could not be created.
    #[error("failed to create anchor window")]
    AnchorCreation(#[source] io::Error),

    /// A popup menu handle could not be created.
    #[error("failed to create popup menu")]
    MenuCreation(#[source] io::Error),

    /// An entry could not be appended to the popup menu.
    #[error("failed to append menu entry {raw_id}")]
    AppendItem {
        raw_id: u32,
        #[source]
        source: io::Error,
    },

    /// The pointer position could not be queried or translated.
    #[error("failed to query cursor position")]
    Cursor(#[source] io::Error),

    /// The anchor window could not be raised.
    #[error("failed to raise anchor window")]
    BringToFront(#[source] io::Error),

    /// The native tracking call reported a failure.
    #[error("popup menu tracking failed")]
    Track(#[source] io::Error),

    /// The controller has no anchor window to own the menu.
    #[error("no anchor window has been created")]
    NoAnchor,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
