//! Tests for the full validation pipeline.

use super::*;
use crate::schema::*;

#[test]
fn default_config_validates() {
    assert!(validate(&TermviewConfig::default()).is_ok());
}

#[test]
fn catches_font_size_too_small() {
    let mut config = TermviewConfig::default();
    config.terminal.font_size = 5;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("terminal.font_size"));
}

#[test]
fn catches_font_size_too_large() {
    let mut config = TermviewConfig::default();
    config.terminal.font_size = 100;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("terminal.font_size"));
}

#[test]
fn catches_zero_geometry() {
    let mut config = TermviewConfig::default();
    config.terminal.default_cols = 0;
    config.terminal.default_rows = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("terminal.default_cols"));
    assert!(err.contains("terminal.default_rows"));
}

#[test]
fn catches_empty_source() {
    let mut config = TermviewConfig::default();
    config.terminal.source = "  ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("terminal.source must not be empty"));
}

#[test]
fn catches_tiny_window() {
    let mut config = TermviewConfig::default();
    config.window.width = 10;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("window.width"));
}

#[test]
fn catches_absurd_buffer_capacity() {
    let mut config = TermviewConfig::default();
    config.bridge.buffer_capacity = 50_000_000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("bridge.buffer_capacity"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = TermviewConfig::default();
    config.terminal.font_size = 1;
    config.window.height = 1;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("terminal.font_size"));
    assert!(err.contains("window.height"));
    assert!(err.contains("; "));
}
