//! Shell process feeding the terminal surface.
//!
//! Uses `portable-pty` for cross-platform PTY spawning. A background reader
//! thread forwards output chunks over a channel; the UI loop drains them,
//! decodes UTF-8 across chunk boundaries, and hands the text to the bridge
//! session. Input and resize events from the surface flow back here.

mod decode;
mod io;
mod spawn;
mod types;

pub use decode::Utf8Decoder;
pub use spawn::{spawn_pty, ShellLaunch};
pub use types::PtyHandle;
