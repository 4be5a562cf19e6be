use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("config watch error: {0}")]
    WatchError(String),
}

/// Failures reported by an embedded content surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("failed to create content environment: {0}")]
    Environment(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("failed to post message: {0}")]
    PostMessage(String),

    #[error("surface has been torn down")]
    TornDown,
}

#[derive(Debug, thiserror::Error)]
pub enum TermviewError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// PTY allocation, spawn or resize failed.
    #[error("terminal error: {0}")]
    Terminal(String),
}
