use std::io::Write;
use std::sync::mpsc;

use portable_pty::{Child, MasterPty};
use termview_common::TermSize;

/// Maximum bytes read from the PTY in one syscall.
pub const PTY_READ_CHUNK: usize = 8_192;

/// Maximum bytes forwarded to the surface per poll.
pub const PTY_MAX_OUTPUT_PER_POLL: usize = 65_536;

/// The master side of the shell's PTY pair.
pub struct PtyHandle {
    pub(super) writer: Box<dyn Write + Send>,
    /// Output chunks from the reader thread.
    pub(super) output_rx: mpsc::Receiver<Vec<u8>>,
    /// Output received past the per-poll limit, sent next poll.
    pub(super) overflow: Vec<u8>,
    pub(super) child: Box<dyn Child + Send + Sync>,
    /// Kept for resize.
    pub(super) master: Box<dyn MasterPty + Send>,
    pub(super) size: TermSize,
    /// Set once the reader thread has hung up.
    pub(super) finished: bool,
}

impl PtyHandle {
    pub fn size(&self) -> TermSize {
        self.size
    }
}
