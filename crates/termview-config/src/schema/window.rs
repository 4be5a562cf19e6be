//! Host window configuration types.

use serde::{Deserialize, Serialize};

/// Host window settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WindowConfig {
    /// Static window title.
    pub title: String,
    /// Initial logical width (valid range: 200-10000).
    pub width: u32,
    /// Initial logical height (valid range: 200-10000).
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "termview".into(),
            width: 960,
            height: 600,
        }
    }
}
