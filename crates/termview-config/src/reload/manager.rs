use std::path::{Path, PathBuf};

use termview_common::ConfigError;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::schema::TermviewConfig;
use crate::watcher::ConfigWatcher;
use crate::{toml_loader, validation};

/// Owns the current config and publishes replacements on a
/// [`watch`] channel.
///
/// Only validated configs are ever published; a broken edit leaves the
/// previous config in place.
pub struct ReloadManager {
    path: PathBuf,
    tx: watch::Sender<TermviewConfig>,
}

impl ReloadManager {
    /// Load `path` as the starting config, or defaults if that fails.
    pub fn new(path: PathBuf) -> Self {
        let initial = match load_checked(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), "{e}; starting from defaults");
                TermviewConfig::default()
            }
        };
        let (tx, _) = watch::channel(initial);
        Self { path, tx }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current(&self) -> TermviewConfig {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TermviewConfig> {
        self.tx.subscribe()
    }

    /// Re-read the file. Returns whether subscribers were notified, which
    /// only happens when the content actually differs.
    pub fn reload(&self) -> Result<bool, ConfigError> {
        let config = load_checked(&self.path)?;
        Ok(self.tx.send_if_modified(|current| {
            if *current == config {
                return false;
            }
            *current = config;
            true
        }))
    }

    /// Watch the file on the current tokio runtime until every subscriber
    /// is gone.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(self) {
        let mut watcher = match ConfigWatcher::new(self.path.clone()) {
            Ok(watcher) => watcher,
            Err(e) => {
                error!("config reload disabled: {e}");
                return;
            }
        };

        loop {
            tokio::select! {
                _ = self.tx.closed() => break,
                change = watcher.changed() => {
                    if change.is_none() {
                        break;
                    }
                    match self.reload() {
                        Ok(true) => info!(path = %self.path.display(), "config reloaded"),
                        Ok(false) => {}
                        Err(e) => warn!("keeping previous config: {e}"),
                    }
                }
            }
        }
        info!("config reload stopped");
    }
}

fn load_checked(path: &Path) -> Result<TermviewConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}
