//! A [`MenuHost`] without a windowing system.
//!
//! Menus are plain records. Tracking returns immediately, delivering a
//! selection first if one was queued with [`HeadlessMenuHost::select_next`].

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::io;

use dpi::PhysicalPosition;
use tracing::trace;

use crate::attributes::{ContextMenuAttributes, TrackOptions};
use crate::error::{Error, Result};
use crate::host::{AnchorId, MenuHost};
use crate::registry::{AnchorMessage, AnchorRegistry};

/// Handle to a headless menu.
#[derive(Debug, PartialEq, Eq)]
pub struct HeadlessMenu(usize);

/// A menu that was tracked by a [`HeadlessMenuHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedMenu {
    pub anchor: AnchorId,
    pub position: PhysicalPosition<i32>,
    /// `(raw id, label)` pairs in display order.
    pub items: Vec<(u32, String)>,
    pub options: TrackOptions,
}

#[derive(Debug, Default)]
pub struct HeadlessMenuHost {
    registry: AnchorRegistry,
    next_handle: Cell<usize>,
    cursor: Cell<PhysicalPosition<i32>>,
    anchor_origin: Cell<PhysicalPosition<i32>>,
    anchors: RefCell<BTreeSet<AnchorId>>,
    raised: RefCell<Vec<AnchorId>>,
    menus: RefCell<HashMap<usize, Vec<(u32, String)>>>,
    menus_created: Cell<usize>,
    peak_live_menus: Cell<usize>,
    tracked: RefCell<Vec<TrackedMenu>>,
    pending_selection: Cell<Option<u32>>,
    fail_anchor: Cell<bool>,
    fail_menu: Cell<bool>,
    fail_cursor: Cell<bool>,
    fail_track: Cell<bool>,
}

impl HeadlessMenuHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_handle(&self) -> usize {
        let handle = self.next_handle.get() + 1;
        self.next_handle.set(handle);
        handle
    }

    /// Set the pointer position in screen coordinates.
    pub fn set_cursor(&self, position: PhysicalPosition<i32>) {
        self.cursor.set(position);
    }

    /// Set the screen position of every anchor's client origin.
    pub fn set_anchor_origin(&self, origin: PhysicalPosition<i32>) {
        self.anchor_origin.set(origin);
    }

    /// Choose the item with `raw_id` when the next menu is tracked.
    pub fn select_next(&self, raw_id: u32) {
        self.pending_selection.set(Some(raw_id));
    }

    /// Make anchor creation fail until reset.
    pub fn fail_anchor_creation(&self, fail: bool) {
        self.fail_anchor.set(fail);
    }

    /// Make menu creation fail until reset.
    pub fn fail_menu_creation(&self, fail: bool) {
        self.fail_menu.set(fail);
    }

    /// Make cursor queries fail until reset.
    pub fn fail_cursor_query(&self, fail: bool) {
        self.fail_cursor.set(fail);
    }

    /// Make tracking fail until reset.
    pub fn fail_tracking(&self, fail: bool) {
        self.fail_track.set(fail);
    }

    /// Deliver a message to an anchor, as the platform would.
    pub fn send_message(&self, anchor: AnchorId, message: AnchorMessage) -> bool {
        self.registry.dispatch(anchor, message)
    }

    pub fn live_anchors(&self) -> usize {
        self.anchors.borrow().len()
    }

    pub fn live_menus(&self) -> usize {
        self.menus.borrow().len()
    }

    pub fn menus_created(&self) -> usize {
        self.menus_created.get()
    }

    /// Highest number of menus that were alive at the same time.
    pub fn peak_live_menus(&self) -> usize {
        self.peak_live_menus.get()
    }

    /// Every menu tracked so far, oldest first.
    pub fn tracked(&self) -> Vec<TrackedMenu> {
        self.tracked.borrow().clone()
    }

    /// Anchors raised to the top, in order.
    pub fn raised(&self) -> Vec<AnchorId> {
        self.raised.borrow().clone()
    }
}

fn unavailable(what: &str) -> io::Error {
    io::Error::new(io::ErrorKind::Unsupported, format!("{what} disabled"))
}

impl MenuHost for HeadlessMenuHost {
    type Menu = HeadlessMenu;

    fn registry(&self) -> &AnchorRegistry {
        &self.registry
    }

    fn create_anchor(&self, _attributes: &ContextMenuAttributes) -> Result<AnchorId> {
        if self.fail_anchor.get() {
            return Err(Error::AnchorCreation(unavailable("anchor creation")));
        }
        let anchor = AnchorId::from_raw(self.next_handle());
        self.anchors.borrow_mut().insert(anchor);
        Ok(anchor)
    }

    fn destroy_anchor(&self, anchor: AnchorId) {
        self.anchors.borrow_mut().remove(&anchor);
    }

    fn cursor_position(&self, anchor: AnchorId) -> Result<PhysicalPosition<i32>> {
        if !self.anchors.borrow().contains(&anchor) {
            return Err(Error::Cursor(io::Error::new(
                io::ErrorKind::NotFound,
                "unknown anchor",
            )));
        }
        if self.fail_cursor.get() {
            return Err(Error::Cursor(unavailable("cursor query")));
        }
        let cursor = self.cursor.get();
        let origin = self.anchor_origin.get();
        Ok(PhysicalPosition::new(cursor.x - origin.x, cursor.y - origin.y))
    }

    fn create_menu(&self) -> Result<HeadlessMenu> {
        if self.fail_menu.get() {
            return Err(Error::MenuCreation(unavailable("menu creation")));
        }
        let handle = self.next_handle();
        let live = {
            let mut menus = self.menus.borrow_mut();
            menus.insert(handle, Vec::new());
            menus.len()
        };
        self.menus_created.set(self.menus_created.get() + 1);
        self.peak_live_menus.set(self.peak_live_menus.get().max(live));
        Ok(HeadlessMenu(handle))
    }

    fn append_item(&self, menu: &HeadlessMenu, raw_id: u32, label: &str) -> Result<()> {
        match self.menus.borrow_mut().get_mut(&menu.0) {
            Some(items) => {
                items.push((raw_id, label.to_owned()));
                Ok(())
            }
            None => Err(Error::AppendItem {
                raw_id,
                source: io::Error::new(io::ErrorKind::NotFound, "menu was destroyed"),
            }),
        }
    }

    fn destroy_menu(&self, menu: HeadlessMenu) {
        self.menus.borrow_mut().remove(&menu.0);
    }

    fn bring_to_front(&self, anchor: AnchorId) -> Result<()> {
        self.raised.borrow_mut().push(anchor);
        Ok(())
    }

    fn track(
        &self,
        menu: &HeadlessMenu,
        anchor: AnchorId,
        position: PhysicalPosition<i32>,
        options: &TrackOptions,
    ) -> Result<()> {
        let items = self.menus.borrow().get(&menu.0).cloned().ok_or_else(|| {
            Error::Track(io::Error::new(io::ErrorKind::NotFound, "menu was destroyed"))
        })?;
        if self.fail_track.get() {
            return Err(Error::Track(unavailable("tracking")));
        }
        trace!(?anchor, ?position, items = items.len(), "tracking headless menu");

        // Only an item that is on the menu can be chosen.
        let selection = self
            .pending_selection
            .take()
            .filter(|raw_id| items.iter().any(|(id, _)| id == raw_id));
        if selection.is_none() {
            trace!("headless menu dismissed without a selection");
        }
        self.tracked.borrow_mut().push(TrackedMenu {
            anchor,
            position,
            items,
            options: *options,
        });

        if let Some(raw_id) = selection {
            self.registry.dispatch(anchor, AnchorMessage::Command(raw_id));
        }
        Ok(())
    }
}
