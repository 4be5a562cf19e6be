//! PTY I/O: write input, drain output, resize, kill.

use std::io::Write;
use std::sync::mpsc;

use termview_common::{Result, TermSize, TermviewError};

use super::spawn::pty_size;
use super::types::{PtyHandle, PTY_MAX_OUTPUT_PER_POLL};

impl PtyHandle {
    /// Write input bytes (keystrokes from the surface) to the shell.
    pub fn write_input(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Drain available output, at most `PTY_MAX_OUTPUT_PER_POLL` bytes.
    ///
    /// Non-blocking. Anything past the limit is kept for the next call.
    pub fn drain_output(&mut self) -> Vec<u8> {
        let mut buf = std::mem::take(&mut self.overflow);

        while buf.len() < PTY_MAX_OUTPUT_PER_POLL {
            match self.output_rx.try_recv() {
                Ok(chunk) => buf.extend_from_slice(&chunk),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    self.finished = true;
                    break;
                }
            }
        }

        if buf.len() > PTY_MAX_OUTPUT_PER_POLL {
            self.overflow = buf.split_off(PTY_MAX_OUTPUT_PER_POLL);
        }
        buf
    }

    /// True once the reader thread has exited and all output was drained.
    pub fn is_finished(&self) -> bool {
        self.finished && self.overflow.is_empty()
    }

    pub fn resize(&mut self, size: TermSize) -> Result<()> {
        self.master
            .resize(pty_size(size))
            .map_err(|e| TermviewError::Terminal(format!("PTY resize failed: {e}")))?;
        self.size = size;
        Ok(())
    }

    pub fn kill(&mut self) {
        if let Err(e) = self.child.kill() {
            tracing::debug!("PTY kill error (may already be dead): {e}");
        }
    }

    /// Exit code of the child, if it has exited.
    pub fn try_exit_code(&mut self) -> Option<u32> {
        match self.child.try_wait() {
            Ok(status) => status.map(|s| s.exit_code()),
            Err(e) => {
                tracing::debug!("PTY wait error: {e}");
                None
            }
        }
    }
}
