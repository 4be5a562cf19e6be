//! Debounced change notifications for the config file.

mod config_watcher;


pub use config_watcher::{ConfigWatcher, DEBOUNCE};
