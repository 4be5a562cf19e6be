pub mod errors;
pub mod id;
pub mod types;

pub use errors::{ConfigError, SurfaceError, TermviewError};
pub use id::SessionId;
pub use types::{OverflowPolicy, TermSize};

pub type Result<T> = std::result::Result<T, TermviewError>;
