//! Full configuration validation.
//!
//! Validates numeric ranges and required strings, collecting every
//! error into a single `ConfigError`.

mod helpers;

#[cfg(test)]
mod tests;

use crate::schema::TermviewConfig;
use termview_common::ConfigError;

use helpers::{validate_non_empty, validate_range};

/// Upper bound for a configured outbound buffer.
pub const MAX_BUFFER_CAPACITY: u32 = 10_000_000;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &TermviewConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_terminal(&mut errors, config);
    validate_window(&mut errors, config);
    validate_bridge(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_terminal(errors: &mut Vec<String>, config: &TermviewConfig) {
    let terminal = &config.terminal;
    validate_non_empty(errors, "terminal.source", &terminal.source);
    validate_non_empty(errors, "terminal.font_family", &terminal.font_family);
    validate_range(errors, "terminal.font_size", terminal.font_size, 8, 72);
    validate_range(
        errors,
        "terminal.default_cols",
        u32::from(terminal.default_cols),
        1,
        500,
    );
    validate_range(
        errors,
        "terminal.default_rows",
        u32::from(terminal.default_rows),
        1,
        500,
    );
}

fn validate_window(errors: &mut Vec<String>, config: &TermviewConfig) {
    validate_range(errors, "window.width", config.window.width, 200, 10_000);
    validate_range(errors, "window.height", config.window.height, 200, 10_000);
}

fn validate_bridge(errors: &mut Vec<String>, config: &TermviewConfig) {
    let capacity = u32::try_from(config.bridge.buffer_capacity).unwrap_or(u32::MAX);
    validate_range(
        errors,
        "bridge.buffer_capacity",
        capacity,
        0,
        MAX_BUFFER_CAPACITY,
    );
}
