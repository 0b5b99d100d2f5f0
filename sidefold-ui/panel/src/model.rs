use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default width of a folded panel rail, in pixels.
pub const DEFAULT_FOLDED_WIDTH: f32 = 64.0;

/// Duration of the backdrop fade and of the deferred hide after close.
pub const PANEL_ANIMATION: Duration = Duration::from_millis(300);

pub const BACKDROP_CLASS: &str = "sidefold-sidebar-overlay";
pub const BACKDROP_INVISIBLE_CLASS: &str = "sidefold-sidebar-overlay-invisible";

pub(crate) const CLASS_OPEN: &str = "open";
pub(crate) const CLASS_FOLDED: &str = "folded";
pub(crate) const CLASS_UNFOLDED: &str = "unfolded";
pub(crate) const CLASS_LOCKED_OPEN: &str = "locked-open";
pub(crate) const CLASS_ANIMATIONS_ENABLED: &str = "animations-enabled";

/// Screen edge a panel is attached to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelPosition {
    #[default]
    Left,
    Right,
}

impl PanelPosition {
    /// Class added to the panel root at start.
    pub fn class_name(self) -> &'static str {
        match self {
            PanelPosition::Left => "left-positioned",
            PanelPosition::Right => "right-positioned",
        }
    }

    /// Margin property overridden on the neighbour when folding.
    pub(crate) fn margin_property(self) -> &'static str {
        match self {
            PanelPosition::Left => "margin-left",
            PanelPosition::Right => "margin-right",
        }
    }
}

/// Panel inputs, fixed once the panel is mounted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Registry key.
    pub name: String,
    pub position: PanelPosition,
    /// Breakpoint name that keeps the panel locked open while it matches.
    pub locked_open: Option<String>,
    /// Render the backdrop transparent while keeping it clickable.
    pub invisible_overlay: bool,
    pub folded_width: f32,
    /// Temporarily unfold a folded panel while the pointer is over it.
    pub folded_auto_trigger_on_hover: bool,
}

impl PanelConfig {
    pub fn new(name: impl Into<String>, position: PanelPosition) -> Self {
        Self {
            name: name.into(),
            position,
            ..Self::default()
        }
    }

    pub fn with_locked_open(mut self, breakpoint: impl Into<String>) -> Self {
        self.locked_open = Some(breakpoint.into());
        self
    }

    pub fn with_invisible_overlay(mut self, invisible: bool) -> Self {
        self.invisible_overlay = invisible;
        self
    }

    pub fn with_folded_width(mut self, width: f32) -> Self {
        self.folded_width = width;
        self
    }

    pub fn with_hover_unfold(mut self, enabled: bool) -> Self {
        self.folded_auto_trigger_on_hover = enabled;
        self
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: PanelPosition::Left,
            locked_open: None,
            invisible_overlay: false,
            folded_width: DEFAULT_FOLDED_WIDTH,
            folded_auto_trigger_on_hover: true,
        }
    }
}
