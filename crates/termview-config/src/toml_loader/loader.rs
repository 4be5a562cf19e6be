use std::path::Path;

use termview_common::ConfigError;
use tracing::{info, warn};

use super::paths::{default_config_path, write_default_config};
use crate::schema::TermviewConfig;
use crate::validation;

/// Parse TOML text. Missing sections and fields take their defaults.
pub fn parse_config(content: &str) -> Result<TermviewConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Read and parse `path`.
///
/// Out-of-range values are only warned about here; the parsed config is
/// returned unchanged. Use [`validation::validate`] for a hard check.
pub fn load_from_path(path: &Path) -> Result<TermviewConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::ParseError(format!("cannot read {}: {e}", path.display())),
    })?;

    let config = parse_config(&content)?;
    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), "{e}");
    }

    info!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Load the config at [`default_config_path`], writing the template on
/// first run.
pub fn load_default() -> Result<TermviewConfig, ConfigError> {
    let path = default_config_path()?;
    if path.exists() {
        return load_from_path(&path);
    }

    write_default_config(&path)?;
    Ok(TermviewConfig::default())
}
