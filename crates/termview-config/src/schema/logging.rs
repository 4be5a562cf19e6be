//! Logging configuration types.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `tracing_subscriber` filter directive for the termview crates.
    pub fn directive(self) -> &'static str {
        match self {
            Self::Trace => "termview=trace",
            Self::Debug => "termview=debug",
            Self::Info => "termview=info",
            Self::Warn => "termview=warn",
            Self::Error => "termview=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
#[derive(Default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_directive() {
        assert_eq!(LogLevel::default().directive(), "termview=info");
        assert_eq!(LogLevel::Debug.directive(), "termview=debug");
    }

    #[test]
    fn log_level_parses_lowercase() {
        let config: LoggingConfig = toml::from_str("level = \"warn\"").unwrap();
        assert_eq!(config.level, LogLevel::Warn);
    }
}
