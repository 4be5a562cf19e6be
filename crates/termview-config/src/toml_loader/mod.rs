//! TOML config file loading and first-run creation.

mod loader;
mod paths;
mod template;


pub use loader::{load_default, load_from_path, parse_config};
pub use paths::{config_path_in, default_config_path, write_default_config};
