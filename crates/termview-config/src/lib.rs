//! termview configuration system.
//!
//! Provides TOML-based configuration with validation and live reload.
//! All config sections use sensible defaults so partial configs work
//! out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use termview_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("font size: {}", config.terminal.font_size);
//! ```

pub mod reload;
pub mod schema;
pub mod toml_loader;
pub mod validation;
pub mod watcher;

pub use reload::ReloadManager;
pub use schema::{TermviewConfig, CONFIG_SCHEMA_VERSION};
pub use watcher::ConfigWatcher;

use std::path::Path;

use termview_common::ConfigError;

/// Load config from the platform default path.
///
/// Creates a default `config.toml` if none exists, then validates the result.
pub fn load_config() -> Result<TermviewConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path (e.g. a `--config` override).
pub fn load_config_from(path: &Path) -> Result<TermviewConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn load_config_from_missing_path_is_file_not_found() {
        let err = load_config_from(Path::new("/tmp/termview_missing_dir/config.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn load_config_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[terminal]\nfont_size = 2\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("terminal.font_size"));
    }

    #[test]
    fn load_config_from_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[bridge]\nbuffer_capacity = 512\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.bridge.buffer_capacity, 512);
    }
}
