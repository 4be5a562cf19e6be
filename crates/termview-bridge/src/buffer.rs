//! FIFO of outbound messages produced before the surface is ready.

use std::collections::VecDeque;

use termview_common::OverflowPolicy;
use termview_config::schema::BridgeConfig;

use crate::envelope::OutboundMessage;

/// Bound and overflow behavior for an [`OutboundBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferPolicy {
    /// `None` keeps the buffer unbounded.
    pub capacity: Option<usize>,
    pub overflow: OverflowPolicy,
}

impl BufferPolicy {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn bounded(capacity: usize, overflow: OverflowPolicy) -> Self {
        Self {
            capacity: Some(capacity.max(1)),
            overflow,
        }
    }
}

impl From<&BridgeConfig> for BufferPolicy {
    fn from(config: &BridgeConfig) -> Self {
        match config.capacity() {
            Some(capacity) => Self::bounded(capacity, config.overflow),
            None => Self::unbounded(),
        }
    }
}

/// Ordered queue of not-yet-delivered outbound messages.
#[derive(Debug, Default)]
pub struct OutboundBuffer {
    queue: VecDeque<OutboundMessage>,
    policy: BufferPolicy,
}

impl OutboundBuffer {
    pub fn new(policy: BufferPolicy) -> Self {
        Self {
            queue: VecDeque::new(),
            policy,
        }
    }

    /// Append a message, applying the overflow policy when full.
    ///
    /// Returns the message that was dropped to respect the bound, if any.
    pub fn push(&mut self, message: OutboundMessage) -> Option<OutboundMessage> {
        match self.policy.capacity {
            Some(capacity) if self.queue.len() >= capacity => match self.policy.overflow {
                OverflowPolicy::DropOldest => {
                    let evicted = self.queue.pop_front();
                    self.queue.push_back(message);
                    evicted
                }
                OverflowPolicy::DropNewest => Some(message),
            },
            _ => {
                self.queue.push_back(message);
                None
            }
        }
    }

    /// Remove every buffered message, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = OutboundMessage> + '_ {
        self.queue.drain(..)
    }

    /// Discard everything without delivering it. Returns how many were dropped.
    pub fn discard(&mut self) -> usize {
        let count = self.queue.len();
        self.queue.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn policy(&self) -> BufferPolicy {
        self.policy
    }
}
