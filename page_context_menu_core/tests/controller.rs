use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dpi::PhysicalPosition;
use page_context_menu_core::{
    AnchorMessage, CommandTarget, ContentSurface, ContextMenuAttributes, ContextMenuController,
    ContextSnapshot, HeadlessMenuHost, MenuEntryId, MenuHost, MenuLabels, MenuState,
};

/// Everything the controller asked the page to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PageCall {
    Drain,
    Command(String),
    CopyImage(i32, i32),
    Inspect(i32, i32),
}

struct Frame {
    calls: Rc<RefCell<Vec<PageCall>>>,
}

impl CommandTarget for Frame {
    fn execute_command(&self, name: &str) {
        self.calls.borrow_mut().push(PageCall::Command(name.to_owned()));
    }
}

#[derive(Default)]
struct Page {
    devtools: Cell<bool>,
    has_focus: Cell<bool>,
    calls: Rc<RefCell<Vec<PageCall>>>,
}

impl Page {
    fn new() -> Rc<Self> {
        let page = Self::default();
        page.has_focus.set(true);
        Rc::new(page)
    }

    fn calls(&self) -> Vec<PageCall> {
        self.calls.borrow().clone()
    }
}

impl ContentSurface for Page {
    fn is_devtools_connected(&self) -> bool {
        self.devtools.get()
    }

    fn focused_frame(&self) -> Option<Rc<dyn CommandTarget>> {
        self.has_focus.get().then(|| {
            Rc::new(Frame {
                calls: self.calls.clone(),
            }) as Rc<dyn CommandTarget>
        })
    }

    fn copy_image_at(&self, position: PhysicalPosition<i32>) {
        self.calls
            .borrow_mut()
            .push(PageCall::CopyImage(position.x, position.y));
    }

    fn inspect_element_at(&self, x: i32, y: i32) {
        self.calls.borrow_mut().push(PageCall::Inspect(x, y));
    }

    fn drain_pending_input(&self) {
        self.calls.borrow_mut().push(PageCall::Drain);
    }
}

type Controller = ContextMenuController<Rc<HeadlessMenuHost>, Page>;

fn setup() -> (Rc<HeadlessMenuHost>, Rc<Page>, Rc<Controller>) {
    let host = Rc::new(HeadlessMenuHost::new());
    let page = Page::new();
    let controller =
        ContextMenuController::new(host.clone(), Rc::downgrade(&page), Default::default());
    (host, page, controller)
}

fn shown_ids(controller: &Controller) -> Vec<MenuEntryId> {
    controller
        .current_entries()
        .iter()
        .map(|entry| entry.id)
        .collect()
}

#[test]
fn construction_creates_and_registers_anchor() {
    let (host, _page, controller) = setup();
    let anchor = controller.anchor().unwrap();
    assert_eq!(host.live_anchors(), 1);
    assert!(host.registry().contains(anchor));
    assert!(controller.init());
    assert_eq!(host.live_anchors(), 1);
}

#[test]
fn blank_snapshot_shows_nothing() {
    let (host, page, controller) = setup();
    assert!(!controller.show(&ContextSnapshot::default()));
    assert!(host.tracked().is_empty());
    assert_eq!(host.live_menus(), 0);
    assert!(controller.last_snapshot().is_none());
    assert!(page.calls().is_empty());
}

#[test]
fn selected_text_copies_once() {
    let (host, page, controller) = setup();
    host.select_next(MenuEntryId::SelectedTextCopy.to_raw());

    let snapshot = ContextSnapshot::default().with_selected_text("hello");
    assert!(controller.show(&snapshot));

    assert_eq!(shown_ids(&controller), vec![MenuEntryId::SelectedTextCopy]);
    assert_eq!(
        page.calls(),
        vec![PageCall::Drain, PageCall::Command("Copy".into())]
    );
    assert_eq!(controller.state(), MenuState::Idle);
}

#[test]
fn editable_snapshot_offers_edit_group_and_undo_runs() {
    let (host, page, controller) = setup();
    host.select_next(MenuEntryId::Undo.to_raw());

    assert!(controller.show(&ContextSnapshot::default().with_editable(true)));

    assert_eq!(
        shown_ids(&controller),
        vec![
            MenuEntryId::Cut,
            MenuEntryId::Paste,
            MenuEntryId::SelectAll,
            MenuEntryId::Undo,
        ]
    );
    let tracked = host.tracked();
    let labels: Vec<&str> = tracked[0].items.iter().map(|(_, label)| label.as_str()).collect();
    assert_eq!(labels, ["Cut", "Paste", "Select all", "Undo"]);
    assert_eq!(
        page.calls(),
        vec![PageCall::Drain, PageCall::Command("Undo".into())]
    );
}

#[test]
fn full_menu_keeps_display_order() {
    let (host, page, controller) = setup();
    page.devtools.set(true);
    let snapshot = ContextSnapshot::at(PhysicalPosition::new(3, 4))
        .with_selected_text("x")
        .with_image_at(PhysicalPosition::new(3, 4))
        .with_editable(true);

    assert!(controller.show(&snapshot));
    assert_eq!(shown_ids(&controller), MenuEntryId::ALL.to_vec());
    let raw: Vec<u32> = host.tracked()[0].items.iter().map(|(id, _)| *id).collect();
    let expected: Vec<u32> = MenuEntryId::ALL.iter().map(|id| id.to_raw()).collect();
    assert_eq!(raw, expected);
}

#[test]
fn copy_image_consumes_position() {
    let (host, page, controller) = setup();
    let snapshot = ContextSnapshot::at(PhysicalPosition::new(40, 50))
        .with_image_at(PhysicalPosition::new(41, 52));

    assert!(controller.show(&snapshot));
    assert_eq!(shown_ids(&controller), vec![MenuEntryId::CopyImage]);
    assert_eq!(controller.image_position(), Some(PhysicalPosition::new(41, 52)));

    assert!(host.send_message(
        controller.anchor().unwrap(),
        AnchorMessage::Command(MenuEntryId::CopyImage.to_raw())
    ));
    assert_eq!(page.calls(), vec![PageCall::Drain, PageCall::CopyImage(41, 52)]);
    assert_eq!(controller.image_position(), None);
}

#[test]
fn image_position_only_lives_with_an_image_menu() {
    let (_host, _page, controller) = setup();
    let image = ContextSnapshot::default().with_image_at(PhysicalPosition::new(1, 1));
    assert!(controller.show(&image));
    assert!(controller.image_position().is_some());

    assert!(controller.show(&ContextSnapshot::default().with_editable(true)));
    assert_eq!(controller.image_position(), None);
}

#[test]
fn repeated_show_releases_previous_menu_first() {
    let (host, _page, controller) = setup();
    let snapshot = ContextSnapshot::default()
        .with_selected_text("a")
        .with_image_at(PhysicalPosition::new(9, 9));

    assert!(controller.show(&snapshot));
    let first = shown_ids(&controller);
    assert!(controller.show(&snapshot));
    let second = shown_ids(&controller);

    assert_eq!(first, second);
    assert_eq!(host.menus_created(), 2);
    assert_eq!(host.live_menus(), 1);
    assert_eq!(host.peak_live_menus(), 1);
    assert_eq!(controller.image_position(), Some(PhysicalPosition::new(9, 9)));
}

#[test]
fn inspect_uses_the_latest_shown_snapshot() {
    let (host, page, controller) = setup();
    page.devtools.set(true);

    assert!(controller.show(&ContextSnapshot::at(PhysicalPosition::new(1, 2))));
    assert!(controller.show(&ContextSnapshot::at(PhysicalPosition::new(30, 40))));
    assert_eq!(shown_ids(&controller), vec![MenuEntryId::InspectElementAt]);

    controller.on_command(MenuEntryId::InspectElementAt);
    assert_eq!(page.calls(), vec![PageCall::Drain, PageCall::Inspect(30, 40)]);
    assert_eq!(host.tracked().len(), 2);
}

#[test]
fn menu_is_anchored_at_translated_cursor() {
    let (host, _page, controller) = setup();
    host.set_anchor_origin(PhysicalPosition::new(100, 200));
    host.set_cursor(PhysicalPosition::new(150, 260));

    assert!(controller.show(&ContextSnapshot::default().with_editable(true)));

    let tracked = host.tracked();
    assert_eq!(tracked[0].position, PhysicalPosition::new(50, 60));
    assert_eq!(tracked[0].options, ContextMenuAttributes::default().track);
    assert_eq!(host.raised(), vec![controller.anchor().unwrap()]);
}

#[test]
fn dismissal_sends_nothing() {
    let (host, page, controller) = setup();
    assert!(controller.show(&ContextSnapshot::default().with_editable(true)));
    assert_eq!(host.tracked().len(), 1);
    assert!(page.calls().is_empty());
}

#[test]
fn paint_close_and_unknown_commands_are_ignored() {
    let (host, page, controller) = setup();
    let anchor = controller.anchor().unwrap();
    assert!(host.send_message(anchor, AnchorMessage::Paint));
    assert!(host.send_message(anchor, AnchorMessage::Close));
    assert!(host.send_message(anchor, AnchorMessage::Other(0x0113)));
    assert!(host.send_message(anchor, AnchorMessage::Command(0)));
    assert!(host.send_message(anchor, AnchorMessage::Command(99)));
    assert!(page.calls().is_empty());
    assert_eq!(controller.anchor(), Some(anchor));
}

#[test]
fn commands_without_focus_only_drain() {
    let (_host, page, controller) = setup();
    page.has_focus.set(false);
    controller.on_command(MenuEntryId::Paste);
    assert_eq!(page.calls(), vec![PageCall::Drain]);
}

#[test]
fn commands_after_surface_drop_are_ignored() {
    let (host, page, controller) = setup();
    drop(page);
    controller.on_command(MenuEntryId::Cut);
    // Devtools are reported as disconnected once the page is gone.
    assert!(!controller.show(&ContextSnapshot::default()));
    assert!(controller.show(&ContextSnapshot::default().with_editable(true)));
    assert_eq!(host.live_menus(), 1);
}

#[test]
fn teardown_releases_everything_and_detaches() {
    let (host, page, controller) = setup();
    let anchor = controller.anchor().unwrap();
    assert!(controller.show(
        &ContextSnapshot::default().with_image_at(PhysicalPosition::new(5, 5))
    ));
    assert_eq!(host.live_menus(), 1);

    drop(controller);

    assert_eq!(host.live_anchors(), 0);
    assert_eq!(host.live_menus(), 0);
    assert!(!host.send_message(
        anchor,
        AnchorMessage::Command(MenuEntryId::CopyImage.to_raw())
    ));
    assert!(page.calls().is_empty());
}

#[test]
fn anchor_failure_is_retried_by_show() {
    let host = Rc::new(HeadlessMenuHost::new());
    host.fail_anchor_creation(true);
    let page = Page::new();
    let controller: Rc<Controller> =
        ContextMenuController::new(host.clone(), Rc::downgrade(&page), Default::default());
    assert_eq!(controller.anchor(), None);

    let snapshot = ContextSnapshot::default().with_editable(true);
    assert!(!controller.show(&snapshot));
    assert!(host.tracked().is_empty());

    host.fail_anchor_creation(false);
    assert!(controller.show(&snapshot));
    assert!(controller.anchor().is_some());
}

#[test]
fn menu_failure_reports_not_shown() {
    let (host, _page, controller) = setup();
    host.fail_menu_creation(true);
    let snapshot = ContextSnapshot::default().with_image_at(PhysicalPosition::new(2, 2));
    assert!(!controller.show(&snapshot));
    assert!(controller.current_entries().is_empty());
    assert_eq!(controller.image_position(), None);
    assert_eq!(host.live_menus(), 0);
}

#[test]
fn reentrant_show_is_refused() {
    struct Reentrant {
        controller: RefCell<Option<Rc<ContextMenuController<Rc<HeadlessMenuHost>, Reentrant>>>>,
        nested: Cell<Option<bool>>,
    }

    impl ContentSurface for Reentrant {
        fn is_devtools_connected(&self) -> bool {
            false
        }

        fn focused_frame(&self) -> Option<Rc<dyn CommandTarget>> {
            None
        }

        fn copy_image_at(&self, _position: PhysicalPosition<i32>) {}

        fn inspect_element_at(&self, _x: i32, _y: i32) {}

        fn drain_pending_input(&self) {
            let controller = self.controller.borrow().clone();
            if let Some(controller) = controller {
                let shown = controller.show(&ContextSnapshot::default().with_editable(true));
                self.nested.set(Some(shown));
            }
        }
    }

    let host = Rc::new(HeadlessMenuHost::new());
    let page = Rc::new(Reentrant {
        controller: RefCell::new(None),
        nested: Cell::new(None),
    });
    let controller =
        ContextMenuController::new(host.clone(), Rc::downgrade(&page), Default::default());
    *page.controller.borrow_mut() = Some(controller.clone());

    host.select_next(MenuEntryId::Paste.to_raw());
    assert!(controller.show(&ContextSnapshot::default().with_editable(true)));
    assert_eq!(page.nested.get(), Some(false));
    assert_eq!(host.tracked().len(), 1);

    page.controller.borrow_mut().take();
}

#[test]
fn localized_labels_reach_the_native_menu() {
    let host = Rc::new(HeadlessMenuHost::new());
    let page = Page::new();
    let attributes = ContextMenuAttributes::default().with_labels(MenuLabels::zh_cn());
    let controller: Rc<Controller> =
        ContextMenuController::new(host.clone(), Rc::downgrade(&page), attributes);

    assert_eq!(controller.attributes().labels, MenuLabels::zh_cn());
    assert!(controller.show(&ContextSnapshot::default().with_selected_text("你好")));
    assert_eq!(host.tracked()[0].items, vec![(2, "复制".to_string())]);
}

#[test]
fn each_entry_runs_exactly_its_own_action() {
    let table = [
        (MenuEntryId::SelectedTextCopy, PageCall::Command("Copy".into())),
        (MenuEntryId::SelectAll, PageCall::Command("SelectAll".into())),
        (MenuEntryId::Undo, PageCall::Command("Undo".into())),
        (MenuEntryId::Cut, PageCall::Command("Cut".into())),
        (MenuEntryId::Paste, PageCall::Command("Paste".into())),
        (MenuEntryId::CopyImage, PageCall::CopyImage(7, 8)),
        (MenuEntryId::InspectElementAt, PageCall::Inspect(20, 30)),
    ];

    for (id, expected) in table {
        let (host, page, controller) = setup();
        page.devtools.set(true);
        let snapshot = ContextSnapshot::at(PhysicalPosition::new(20, 30))
            .with_selected_text("text")
            .with_image_at(PhysicalPosition::new(7, 8))
            .with_editable(true);
        host.select_next(id.to_raw());

        assert!(controller.show(&snapshot), "{id:?}");
        assert_eq!(page.calls(), vec![PageCall::Drain, expected], "{id:?}");
    }
}

#[test]
fn selection_of_an_absent_entry_is_not_delivered() {
    let (host, page, controller) = setup();
    host.select_next(MenuEntryId::SelectedTextCopy.to_raw());

    let snapshot = ContextSnapshot::default().with_image_at(PhysicalPosition::new(4, 4));
    assert!(controller.show(&snapshot));

    assert_eq!(
        host.tracked()[0].items,
        vec![(MenuEntryId::CopyImage.to_raw(), "Copy image".to_string())]
    );
    assert!(page.calls().is_empty());
    assert_eq!(controller.image_position(), Some(PhysicalPosition::new(4, 4)));
}

#[test]
fn cursor_failure_releases_the_superseded_menu() {
    let (host, page, controller) = setup();
    page.devtools.set(true);
    let snapshot = ContextSnapshot::at(PhysicalPosition::new(9, 9))
        .with_image_at(PhysicalPosition::new(9, 9));
    assert!(controller.show(&snapshot));
    assert_eq!(host.live_menus(), 1);

    host.fail_cursor_query(true);
    assert!(!controller.show(&snapshot));

    assert_eq!(host.live_menus(), 0);
    assert!(controller.current_entries().is_empty());
    assert!(controller.last_snapshot().is_none());
    assert_eq!(controller.image_position(), None);

    // A command arriving late for the old menu finds nothing to act on.
    let anchor = controller.anchor().unwrap();
    host.send_message(anchor, AnchorMessage::Command(MenuEntryId::CopyImage.to_raw()));
    host.send_message(anchor, AnchorMessage::Command(MenuEntryId::InspectElementAt.to_raw()));
    assert_eq!(page.calls(), vec![PageCall::Drain, PageCall::Drain]);
}

#[test]
fn tracking_failure_leaves_no_current_menu() {
    let (host, _page, controller) = setup();
    host.fail_tracking(true);
    let snapshot = ContextSnapshot::default()
        .with_image_at(PhysicalPosition::new(1, 1))
        .with_editable(true);

    assert!(!controller.show(&snapshot));

    assert_eq!(controller.state(), MenuState::Idle);
    assert!(controller.current_entries().is_empty());
    assert!(controller.last_snapshot().is_none());
    assert_eq!(controller.image_position(), None);
    assert_eq!(host.live_menus(), 0);
    assert!(host.tracked().is_empty());
}

#[test]
fn copy_image_consumes_position_even_without_surface() {
    let (_host, page, controller) = setup();
    assert!(controller.show(
        &ContextSnapshot::default().with_image_at(PhysicalPosition::new(6, 6))
    ));
    assert!(controller.image_position().is_some());

    drop(page);
    controller.on_command(MenuEntryId::CopyImage);
    assert_eq!(controller.image_position(), None);
}
