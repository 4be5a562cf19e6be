//! Boundary to the embedded content environment.

use async_trait::async_trait;
use termview_common::SurfaceError;
use tokio::sync::mpsc;

/// Where a surface delivers raw inbound message text.
pub type InboundSink = mpsc::UnboundedSender<String>;

/// An embedded content view that hosts the terminal page.
///
/// Implementations are driven by exactly one
/// [`BridgeSession`](crate::session::BridgeSession) and must be safe to
/// call from any thread; a UI-thread-bound view forwards calls to its
/// owning thread.
#[async_trait]
pub trait SurfaceHost: Send + Sync {
    /// Create the content environment (the view and its runtime).
    async fn create_environment(&self) -> Result<(), SurfaceError>;

    /// Load `source` and resolve once navigation has completed.
    async fn navigate(&self, source: &str) -> Result<(), SurfaceError>;

    /// Deliver one serialized envelope to the page. Must not block.
    fn post_message(&self, json: &str) -> Result<(), SurfaceError>;

    /// Route every message the page posts into `sink`, in arrival order.
    fn subscribe(&self, sink: InboundSink);

    /// Stop in-flight content and release the view. Idempotent.
    fn stop(&self);
}
