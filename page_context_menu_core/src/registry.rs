//! Routing of anchor window messages to the controller that owns the anchor.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Weak;

use tracing::trace;

use crate::host::AnchorId;

/// A message received by an anchor window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorMessage {
    /// A menu item was chosen. Carries the item's raw id.
    Command(u32),
    /// The window was asked to repaint.
    Paint,
    /// The window was asked to close.
    Close,
    /// Any other platform message.
    Other(u32),
}

/// Receiver of anchor window messages.
pub trait MessageSink {
    fn handle_message(&self, message: AnchorMessage);
}

/// Maps anchor windows to the controllers that own them.
///
/// Entries are weak, so a message arriving for a controller that is being
/// dropped finds nothing and is ignored.
#[derive(Default)]
pub struct AnchorRegistry {
    sinks: RefCell<HashMap<AnchorId, Weak<dyn MessageSink>>>,
}

impl fmt::Debug for AnchorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnchorRegistry")
            .field("anchors", &self.sinks.borrow().keys().collect::<Vec<_>>())
            .finish()
    }
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route messages for `anchor` to `sink`, replacing any previous entry.
    pub fn register(&self, anchor: AnchorId, sink: Weak<dyn MessageSink>) {
        trace!(?anchor, "registering anchor");
        self.sinks.borrow_mut().insert(anchor, sink);
    }

    /// Stop routing messages for `anchor`.
    pub fn unregister(&self, anchor: AnchorId) {
        trace!(?anchor, "unregistering anchor");
        self.sinks.borrow_mut().remove(&anchor);
    }

    /// Whether a live sink is registered for `anchor`.
    pub fn contains(&self, anchor: AnchorId) -> bool {
        self.sinks
            .borrow()
            .get(&anchor)
            .is_some_and(|sink| sink.strong_count() > 0)
    }

    /// Deliver `message` to the sink registered for `anchor`.
    ///
    /// Returns `false` if no live sink is registered.
    pub fn dispatch(&self, anchor: AnchorId, message: AnchorMessage) -> bool {
        // Upgrade and release the map before calling out so the sink may
        // register or unregister anchors while handling the message.
        let sink = self.sinks.borrow().get(&anchor).and_then(Weak::upgrade);
        match sink {
            Some(sink) => {
                trace!(?anchor, ?message, "dispatching anchor message");
                sink.handle_message(message);
                true
            }
            None => {
                trace!(?anchor, ?message, "no live controller for anchor message");
                false
            }
        }
    }
}
