//! Message bridge between the native host and an embedded terminal surface.
//!
//! The embedded surface bootstraps on its own schedule. Outbound messages
//! sent before it reports `ready` are held in an ordered buffer and drained
//! exactly once when the first `ready` envelope arrives; afterwards every
//! send goes straight to the surface.
//!
//! - [`envelope`]: wire format (`{type, data?}`) as typed sum types
//! - [`buffer`]: FIFO of not-yet-delivered outbound messages
//! - [`gate`]: one-way readiness gate that owns the buffer
//! - [`router`]: classifies inbound envelopes into [`BridgeEvent`]s
//! - [`session`]: public send/receive contract for one terminal view
//! - [`surface`]: the collaborator trait implemented by a content view

pub mod buffer;
pub mod envelope;
pub mod error;
pub mod gate;
pub mod router;
pub mod session;
pub mod surface;

#[cfg(test)]
pub(crate) mod mock;

pub use buffer::{BufferPolicy, OutboundBuffer};
pub use envelope::{EnvelopeError, InboundMessage, OutboundMessage};
pub use error::BridgeError;
pub use gate::ReadinessGate;
pub use router::{BridgeEvent, EventRouter};
pub use session::{BridgeEvents, BridgeSession, SessionOptions, SurfaceState};
pub use surface::{InboundSink, SurfaceHost};
