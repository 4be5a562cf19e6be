//! Outbound buffering policy for the host/surface bridge.

use serde::{Deserialize, Serialize};
use termview_common::OverflowPolicy;

/// Bridge buffering settings.
///
/// Messages sent before the embedded surface reports ready are held in
/// a FIFO buffer. `buffer_capacity = 0` leaves that buffer unbounded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BridgeConfig {
    /// Maximum buffered messages before the overflow policy applies (0 = unbounded).
    pub buffer_capacity: usize,
    /// What to drop when a bounded buffer is full.
    pub overflow: OverflowPolicy,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 0,
            overflow: OverflowPolicy::DropOldest,
        }
    }
}

impl BridgeConfig {
    /// The configured bound, or `None` when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        (self.buffer_capacity > 0).then_some(self.buffer_capacity)
    }
}
