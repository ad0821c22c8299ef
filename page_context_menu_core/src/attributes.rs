//! Configuration for a context menu controller.

use dpi::PhysicalSize;

use crate::labels::MenuLabels;

/// Mouse button that activates items while the menu is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackButton {
    Left,
    /// Items can be chosen with either button.
    #[default]
    Right,
}

/// Vertical placement of the menu relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Horizontal placement of the menu relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Which axis the menu prefers when it has to avoid a screen edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuLayout {
    #[default]
    Horizontal,
    Vertical,
}

/// Flags passed to the native tracking call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackOptions {
    pub button: TrackButton,
    pub vertical: VerticalAlignment,
    pub horizontal: HorizontalAlignment,
    pub layout: MenuLayout,
    /// Animate the menu opening away from the anchor point.
    pub animate: bool,
}

impl Default for TrackOptions {
    fn default() -> Self {
        Self {
            button: TrackButton::Right,
            vertical: VerticalAlignment::Top,
            horizontal: HorizontalAlignment::Left,
            layout: MenuLayout::Horizontal,
            animate: true,
        }
    }
}

impl TrackOptions {
    pub fn with_button(mut self, button: TrackButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_vertical(mut self, vertical: VerticalAlignment) -> Self {
        self.vertical = vertical;
        self
    }

    pub fn with_horizontal(mut self, horizontal: HorizontalAlignment) -> Self {
        self.horizontal = horizontal;
        self
    }

    pub fn with_layout(mut self, layout: MenuLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }
}

/// Configuration for a [`ContextMenuController`](crate::ContextMenuController).
#[derive(Debug, Clone)]
pub struct ContextMenuAttributes {
    /// Window class name of the anchor window (Windows-specific, ignored elsewhere).
    pub class_name: String,
    /// Size of the anchor window. It is never shown.
    pub anchor_size: PhysicalSize<u32>,
    /// Labels used for the menu entries.
    pub labels: MenuLabels,
    /// Flags used when tracking the menu.
    pub track: TrackOptions,
}

impl Default for ContextMenuAttributes {
    fn default() -> Self {
        Self {
            class_name: "MbContextMenu".to_string(),
            anchor_size: PhysicalSize::new(1, 1),
            labels: MenuLabels::default(),
            track: TrackOptions::default(),
        }
    }
}

impl ContextMenuAttributes {
    /// Set the window class name of the anchor window.
    ///
    /// WARNING: On Windows, if this is the same as another window class name, it will cause issues.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Set the size of the anchor window.
    pub fn with_anchor_size(mut self, size: PhysicalSize<u32>) -> Self {
        self.anchor_size = size;
        self
    }

    /// Set the labels used for menu entries.
    pub fn with_labels(mut self, labels: MenuLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Set the tracking flags.
    pub fn with_track_options(mut self, track: TrackOptions) -> Self {
        self.track = track;
        self
    }
}
