use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal geometry in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TermSize {
    pub cols: u16,
    pub rows: u16,
}

impl TermSize {
    pub const DEFAULT_COLS: u16 = 80;
    pub const DEFAULT_ROWS: u16 = 24;

    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }
}

impl Default for TermSize {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COLS, Self::DEFAULT_ROWS)
    }
}

impl fmt::Display for TermSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

/// What a bounded outbound buffer does when a message arrives while full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum OverflowPolicy {
    /// Evict the oldest buffered message to make room.
    #[default]
    DropOldest,
    /// Discard the incoming message.
    DropNewest,
}
