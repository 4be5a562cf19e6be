//! Readiness gate: buffers outbound traffic until the surface is ready.
//!
//! The gate moves `NotReady -> Ready` exactly once. Buffering, draining,
//! and live transmission all happen under one mutex, so a send racing
//! with the transition is ordered strictly after every buffered message.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use termview_common::{SessionId, SurfaceError};
use tracing::{debug, info, warn};

use crate::buffer::{BufferPolicy, OutboundBuffer};
use crate::envelope::OutboundMessage;
use crate::surface::SurfaceHost;

struct GateState {
    ready: bool,
    torn_down: bool,
    buffer: OutboundBuffer,
}

/// One-way readiness flag plus the outbound buffer it governs.
pub struct ReadinessGate {
    session: SessionId,
    surface: Arc<dyn SurfaceHost>,
    state: Mutex<GateState>,
}

impl ReadinessGate {
    pub fn new(session: SessionId, surface: Arc<dyn SurfaceHost>, policy: BufferPolicy) -> Self {
        Self {
            session,
            surface,
            state: Mutex::new(GateState {
                ready: false,
                torn_down: false,
                buffer: OutboundBuffer::new(policy),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Buffer `message` if the gate is closed, otherwise transmit it now.
    ///
    /// After teardown this is a silent no-op.
    pub fn submit(&self, message: OutboundMessage) {
        let mut state = self.lock();

        if state.torn_down {
            debug!(
                session = %self.session.short(),
                kind = message.kind(),
                "send after teardown ignored"
            );
            return;
        }

        if state.ready {
            self.transmit(&message);
            return;
        }

        let kind = message.kind();
        match state.buffer.push(message) {
            Some(dropped) => warn!(
                session = %self.session.short(),
                dropped = dropped.kind(),
                capacity = ?state.buffer.policy().capacity,
                "outbound buffer full, message dropped"
            ),
            None => debug!(
                session = %self.session.short(),
                kind,
                pending = state.buffer.len(),
                "message buffered until surface is ready"
            ),
        }
    }

    /// Open the gate, draining the buffer in FIFO order.
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn open(&self) -> bool {
        let mut state = self.lock();
        if state.ready || state.torn_down {
            return false;
        }

        let drained = state.buffer.len();
        for message in state.buffer.drain() {
            self.transmit(&message);
        }
        state.ready = true;

        info!(
            session = %self.session.short(),
            drained,
            "readiness gate opened"
        );
        true
    }

    /// Mark the gate torn down and discard the buffer without flushing.
    ///
    /// Returns the number of discarded messages.
    pub fn close(&self) -> usize {
        let mut state = self.lock();
        if state.torn_down {
            return 0;
        }
        state.torn_down = true;
        state.buffer.discard()
    }

    pub fn is_ready(&self) -> bool {
        self.lock().ready
    }

    pub fn is_torn_down(&self) -> bool {
        self.lock().torn_down
    }

    pub fn pending_len(&self) -> usize {
        self.lock().buffer.len()
    }

    fn transmit(&self, message: &OutboundMessage) {
        let json = match message.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!(
                    session = %self.session.short(),
                    kind = message.kind(),
                    error = %e,
                    "failed to serialize outbound message"
                );
                return;
            }
        };

        match self.surface.post_message(&json) {
            Ok(()) => debug!(
                session = %self.session.short(),
                kind = message.kind(),
                body_len = json.len(),
                "message posted to surface"
            ),
            Err(SurfaceError::TornDown) => debug!(
                session = %self.session.short(),
                kind = message.kind(),
                "surface already torn down, message dropped"
            ),
            Err(e) => warn!(
                session = %self.session.short(),
                kind = message.kind(),
                error = %e,
                "failed to post message to surface"
            ),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
