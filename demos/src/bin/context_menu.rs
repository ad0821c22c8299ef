//! Right-click anywhere in the window to get the page context menu.
//!
//! The left third behaves like an image, the middle like selected text and the
//! right like an editable field. Middle-click toggles pretend developer tools.

use std::rc::Rc;

use anyhow::anyhow;
use demos::DemoPage;
use page_context_menu::{
    ContextMenuAttributes, ContextMenuController, MenuLabels, NativeMenuHost, native_controller,
};
use tracing::{error, info};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalPosition;
use winit::event::{ButtonSource, ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

struct App {
    window: Option<Box<dyn Window>>,
    page: Rc<DemoPage>,
    controller: Rc<ContextMenuController<NativeMenuHost, DemoPage>>,
}

impl App {
    fn new(labels: MenuLabels) -> Self {
        let page = DemoPage::new();
        let attributes = ContextMenuAttributes::default()
            .with_class_name("PageContextMenuDemo")
            .with_labels(labels);
        let controller = native_controller(Rc::downgrade(&page), attributes);
        App {
            window: None,
            page,
            controller,
        }
    }

    fn show_context_menu(&self, position: PhysicalPosition<f64>) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        let position = PhysicalPosition::new(position.x as i32, position.y as i32);
        let snapshot = self.page.snapshot_at(position, window.surface_size());
        if self.controller.show(&snapshot) {
            info!(
                entries = ?self
                    .controller
                    .current_entries()
                    .iter()
                    .map(|entry| entry.label.as_str())
                    .collect::<Vec<_>>(),
                "context menu closed"
            );
        } else {
            info!("nothing to offer here");
        }
    }
}

impl ApplicationHandler for App {
    fn can_create_surfaces(&mut self, event_loop: &dyn ActiveEventLoop) {
        let window_attributes = WindowAttributes::default()
            .with_title("Page Context Menu - Right-click anywhere!");

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => window,
            Err(err) => {
                error!(%err, "failed to create window");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);

        info!("Window created. Right-click anywhere to see the context menu!");
    }

    fn window_event(&mut self, event_loop: &dyn ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("close requested");
                event_loop.exit();
            }
            WindowEvent::PointerButton {
                state: ElementState::Released,
                button: ButtonSource::Mouse(button),
                position,
                ..
            } => match button {
                MouseButton::Right => self.show_context_menu(position),
                MouseButton::Middle => {
                    let connected = self.page.toggle_devtools();
                    info!(connected, "developer tools toggled");
                }
                _ => {}
            },
            _ => (),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let labels = match std::env::args().nth(1).as_deref() {
        Some("zh-CN") => MenuLabels::zh_cn(),
        _ => MenuLabels::default(),
    };

    let event_loop =
        EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;
    let app = App::new(labels);

    info!("Starting page context menu demo...");

    event_loop
        .run_app(app)
        .map_err(|err| anyhow!("event loop failed: {err}"))?;

    Ok(())
}
