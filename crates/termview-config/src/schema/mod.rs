//! Configuration schema types for termview.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod bridge;
mod logging;
mod shell;
mod terminal;
mod webview;
mod window;

pub use bridge::*;
pub use logging::*;
pub use shell::*;
pub use terminal::*;
pub use webview::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for termview.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
#[derive(Default)]
pub struct TermviewConfig {
    pub bridge: BridgeConfig,
    pub terminal: TerminalConfig,
    pub shell: ShellConfig,
    pub window: WindowConfig,
    pub webview: WebViewSettings,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
