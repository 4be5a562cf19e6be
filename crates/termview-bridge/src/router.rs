//! Inbound envelope routing.
//!
//! The router is the single consumer of the surface's inbound channel. It
//! classifies each raw envelope, flips the readiness gate on the first
//! `ready`, and re-emits host-visible [`BridgeEvent`]s in arrival order.

use std::sync::Arc;

use termview_common::{SessionId, TermSize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::envelope::InboundMessage;
use crate::error::BridgeError;
use crate::gate::ReadinessGate;

/// A host-visible event raised by the embedded surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    /// Non-empty text from an `input` or `binary` envelope.
    InputReceived(String),
    /// The surface reported new geometry (from `ready` or `resize`).
    Resized(TermSize),
    /// The surface finished bootstrapping. Raised at most once per session.
    Ready,
}

pub struct EventRouter {
    session: SessionId,
    gate: Arc<ReadinessGate>,
    events: mpsc::UnboundedSender<BridgeEvent>,
}

impl EventRouter {
    pub fn new(
        session: SessionId,
        gate: Arc<ReadinessGate>,
        events: mpsc::UnboundedSender<BridgeEvent>,
    ) -> Self {
        Self {
            session,
            gate,
            events,
        }
    }

    /// Consume raw envelopes until the inbound channel closes.
    pub async fn run(self, mut inbound: mpsc::UnboundedReceiver<String>) {
        while let Some(raw) = inbound.recv().await {
            self.dispatch(&raw);
        }
        debug!(session = %self.session.short(), "inbound channel closed, router exiting");
    }

    /// Route one raw envelope. Malformed input is logged and dropped.
    pub fn dispatch(&self, raw: &str) {
        if let Err(e) = self.route(raw) {
            warn!(
                session = %self.session.short(),
                body_len = raw.len(),
                error = %e,
                "malformed envelope dropped"
            );
        }
    }

    fn route(&self, raw: &str) -> Result<(), BridgeError> {
        if self.gate.is_torn_down() {
            debug!(session = %self.session.short(), "envelope after teardown ignored");
            return Ok(());
        }

        let message = InboundMessage::parse(raw)?;
        debug!(session = %self.session.short(), kind = message.kind(), "envelope received");

        match message {
            InboundMessage::Ready(size) => {
                let first = self.gate.open();
                self.emit(BridgeEvent::Resized(size));
                if first {
                    info!(
                        session = %self.session.short(),
                        cols = size.cols,
                        rows = size.rows,
                        "surface ready"
                    );
                    self.emit(BridgeEvent::Ready);
                }
            }
            InboundMessage::Resize(size) => {
                debug!(
                    session = %self.session.short(),
                    cols = size.cols,
                    rows = size.rows,
                    "surface resized"
                );
                self.emit(BridgeEvent::Resized(size));
            }
            InboundMessage::Input(text) | InboundMessage::Binary(text) => {
                if !text.is_empty() {
                    self.emit(BridgeEvent::InputReceived(text));
                }
            }
            InboundMessage::Unknown(kind) => {
                debug!(session = %self.session.short(), kind = %kind, "unknown envelope ignored");
            }
        }
        Ok(())
    }

    fn emit(&self, event: BridgeEvent) {
        if self.events.send(event).is_err() {
            debug!(session = %self.session.short(), "event receiver dropped");
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
