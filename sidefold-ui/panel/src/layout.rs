use serde::{Deserialize, Serialize};

/// Host layout configuration read by panels at lock activation.
pub trait LayoutSource {
    /// Whether the navigation panel starts folded.
    fn navbar_folded(&self) -> bool;
}

/// Layout configuration of the application shell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub navbar: NavbarConfig,
}

/// Navigation panel section of [`LayoutConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    pub folded: bool,
}

impl LayoutSource for LayoutConfig {
    fn navbar_folded(&self) -> bool {
        self.navbar.folded
    }
}
