use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use termview_common::ConfigError;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Quiet period that must pass after the last file event before a change
/// is reported.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Watches one config file.
///
/// The parent directory is watched rather than the file itself, so saves
/// done as write-to-temp + rename are still seen and the file may not
/// exist yet.
pub struct ConfigWatcher {
    file: PathBuf,
    hits: mpsc::UnboundedReceiver<()>,
    // Dropping this stops the OS watch and closes `hits`.
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    pub fn new(file: PathBuf) -> Result<Self, ConfigError> {
        let dir = match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let name: OsString = file
            .file_name()
            .ok_or_else(|| ConfigError::WatchError(format!("{} is not a file", file.display())))?
            .to_os_string();

        let (tx, hits) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(
            move |result: notify::Result<Event>| match result {
                Ok(event) if touches_file(&event, &name) => {
                    debug!(kind = ?event.kind, "config file event");
                    let _ = tx.send(());
                }
                Ok(_) => {}
                Err(e) => error!("config watch error: {e}"),
            },
        )
        .map_err(|e| ConfigError::WatchError(e.to_string()))?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| ConfigError::WatchError(format!("{}: {e}", dir.display())))?;

        info!(path = %file.display(), "watching config file");
        Ok(Self {
            file,
            hits,
            _watcher: watcher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.file
    }

    /// Wait for the next settled change. `None` once the watch has ended.
    pub async fn changed(&mut self) -> Option<()> {
        settle(&mut self.hits, DEBOUNCE).await
    }
}

/// True for writes and creations that name `file_name`.
pub(crate) fn touches_file(event: &Event, file_name: &OsStr) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name))
}

/// Wait for one hit, then swallow further hits until `quiet` passes
/// without any. A burst of saves therefore yields a single `Some(())`.
pub(crate) async fn settle(hits: &mut mpsc::UnboundedReceiver<()>, quiet: Duration) -> Option<()> {
    hits.recv().await?;
    loop {
        match tokio::time::timeout(quiet, hits.recv()).await {
            Ok(Some(())) => continue,
            // Channel closed mid-burst: still report the change we saw.
            Ok(None) | Err(_) => return Some(()),
        }
    }
}
