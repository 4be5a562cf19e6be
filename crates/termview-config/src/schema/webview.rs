//! Embedded content view settings.

use serde::{Deserialize, Serialize};

/// Settings applied when the content view is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WebViewSettings {
    /// Enable dev tools (always on in debug builds).
    pub devtools: bool,
    /// Transparent background behind the terminal page.
    pub transparent: bool,
    /// Custom user agent string.
    pub user_agent: Option<String>,
}

impl Default for WebViewSettings {
    fn default() -> Self {
        Self {
            devtools: cfg!(debug_assertions),
            transparent: false,
            user_agent: Some(format!("termview/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}
