use std::path::{Path, PathBuf};

use termview_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

const APP_DIR: &str = "termview";
const FILE_NAME: &str = "config.toml";

/// `<base>/termview/config.toml`.
pub fn config_path_in(base: &Path) -> PathBuf {
    base.join(APP_DIR).join(FILE_NAME)
}

/// Config file under the platform config directory
/// (`~/.config` on Linux, `~/Library/Application Support` on macOS).
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|base| config_path_in(&base))
        .ok_or_else(|| ConfigError::ParseError("no platform config directory".into()))
}

/// Write the commented template to `path`, creating parent directories.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let io_error = |e: std::io::Error| {
        ConfigError::ParseError(format!("cannot write {}: {e}", path.display()))
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    std::fs::write(path, default_config_toml()).map_err(io_error)?;

    info!(path = %path.display(), "wrote default config");
    Ok(())
}
