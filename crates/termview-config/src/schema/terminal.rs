//! Embedded terminal surface settings.

use serde::{Deserialize, Serialize};
use termview_common::TermSize;

/// Default panel URL served by the bundled content protocol.
pub const DEFAULT_TERMINAL_SOURCE: &str = "termview://localhost/terminal/index.html";

pub const DEFAULT_FONT_FAMILY: &str = "Menlo, Consolas, 'DejaVu Sans Mono', monospace";

/// Terminal surface settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TerminalConfig {
    /// Page the embedded surface navigates to.
    pub source: String,
    /// Columns used before the surface reports its own geometry (valid range: 1-500).
    pub default_cols: u16,
    /// Rows used before the surface reports its own geometry (valid range: 1-500).
    pub default_rows: u16,
    /// Font size in pixels pushed to the surface (valid range: 8-72).
    pub font_size: u32,
    /// CSS font stack handed to the bundled terminal page.
    pub font_family: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_TERMINAL_SOURCE.into(),
            default_cols: TermSize::DEFAULT_COLS,
            default_rows: TermSize::DEFAULT_ROWS,
            font_size: 14,
            font_family: DEFAULT_FONT_FAMILY.into(),
        }
    }
}

impl TerminalConfig {
    pub fn default_size(&self) -> TermSize {
        TermSize::new(self.default_cols, self.default_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_config_defaults() {
        let config = TerminalConfig::default();
        assert_eq!(config.source, DEFAULT_TERMINAL_SOURCE);
        assert_eq!(config.default_size(), TermSize::new(80, 24));
        assert_eq!(config.font_size, 14);
        assert_eq!(config.font_family, DEFAULT_FONT_FAMILY);
    }

    #[test]
    fn terminal_config_partial_toml() {
        let config: TerminalConfig = toml::from_str("font_size = 18\ndefault_cols = 132\n").unwrap();
        assert_eq!(config.font_size, 18);
        assert_eq!(config.default_cols, 132);
        assert_eq!(config.default_rows, 24);
    }
}
