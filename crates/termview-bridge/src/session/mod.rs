//! Bridge session: the public send/receive contract for one terminal view.
//!
//! A session owns its surface, readiness gate, and router task. It is
//! created with the view, initialized once, and torn down with the view.
//! Outbound calls never block; inbound traffic arrives as [`BridgeEvent`]s
//! on the receiver returned by [`BridgeSession::new`].


use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use termview_common::{SessionId, SurfaceError};
use termview_config::schema::DEFAULT_TERMINAL_SOURCE;
use termview_config::TermviewConfig;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::buffer::BufferPolicy;
use crate::envelope::OutboundMessage;
use crate::error::BridgeError;
use crate::gate::ReadinessGate;
use crate::router::{BridgeEvent, EventRouter};
use crate::surface::SurfaceHost;

/// Receiver side of a session's event stream.
pub type BridgeEvents = mpsc::UnboundedReceiver<BridgeEvent>;

/// Presentation state of the embedded surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SurfaceState {
    #[default]
    Loading,
    Visible,
    /// Initialization failed; carries the failure description.
    Error(String),
}

/// Construction parameters for a [`BridgeSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Page the surface navigates to during initialization.
    pub source: String,
    pub buffer: BufferPolicy,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            source: DEFAULT_TERMINAL_SOURCE.into(),
            buffer: BufferPolicy::unbounded(),
        }
    }
}

impl SessionOptions {
    pub fn from_config(config: &TermviewConfig) -> Self {
        Self {
            source: config.terminal.source.clone(),
            buffer: BufferPolicy::from(&config.bridge),
        }
    }
}

/// Binds one embedded surface to the host for one view's lifetime.
pub struct BridgeSession {
    id: SessionId,
    source: String,
    surface: Arc<dyn SurfaceHost>,
    gate: Arc<ReadinessGate>,
    initialized: AtomicBool,
    state: watch::Sender<SurfaceState>,
    /// Handed to the router on initialization.
    events: Mutex<Option<mpsc::UnboundedSender<BridgeEvent>>>,
    router: Mutex<Option<JoinHandle<()>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl BridgeSession {
    pub fn new(surface: Arc<dyn SurfaceHost>, options: SessionOptions) -> (Self, BridgeEvents) {
        let id = SessionId::new();
        let gate = Arc::new(ReadinessGate::new(
            id,
            Arc::clone(&surface),
            options.buffer,
        ));
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(SurfaceState::Loading);

        debug!(
            session = %id.short(),
            source = %options.source,
            capacity = ?options.buffer.capacity,
            "bridge session created"
        );

        let session = Self {
            id,
            source: options.source,
            surface,
            gate,
            initialized: AtomicBool::new(false),
            state,
            events: Mutex::new(Some(events_tx)),
            router: Mutex::new(None),
        };
        (session, events_rx)
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Create the surface environment, subscribe to its messages, and
    /// navigate to the source page.
    ///
    /// Only the first call does anything; later calls return `Ok(())`
    /// whatever the first outcome was. Failure moves the presentation
    /// state to [`SurfaceState::Error`] and is not retried, unless the
    /// session was torn down meanwhile, in which case the state is left alone.
    pub async fn initialize(&self) -> Result<(), BridgeError> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            debug!(session = %self.id.short(), "initialize called again, ignoring");
            return Ok(());
        }

        info!(session = %self.id.short(), source = %self.source, "initializing surface");

        match self.bootstrap().await {
            Ok(()) => {
                self.state.send_replace(SurfaceState::Visible);
                info!(session = %self.id.short(), "surface visible");
                Ok(())
            }
            Err(e) if self.gate.is_torn_down() => {
                debug!(session = %self.id.short(), error = %e, "initialization cut short by teardown");
                Err(e.into())
            }
            Err(e) => {
                error!(session = %self.id.short(), error = %e, "surface initialization failed");
                self.state.send_replace(SurfaceState::Error(e.to_string()));
                Err(e.into())
            }
        }
    }

    async fn bootstrap(&self) -> Result<(), SurfaceError> {
        if self.gate.is_torn_down() {
            return Err(SurfaceError::TornDown);
        }

        self.surface.create_environment().await?;

        let events = lock(&self.events).take().ok_or(SurfaceError::TornDown)?;
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        self.surface.subscribe(inbound_tx);

        let router = EventRouter::new(self.id, Arc::clone(&self.gate), events);
        let handle = tokio::spawn(router.run(inbound_rx));
        {
            let mut slot = lock(&self.router);
            if self.gate.is_torn_down() {
                handle.abort();
                return Err(SurfaceError::TornDown);
            }
            *slot = Some(handle);
        }

        self.surface.navigate(&self.source).await
    }

    /// Stop the surface and discard anything still buffered.
    ///
    /// Idempotent. Every later send is a silent no-op.
    pub fn teardown(&self) {
        if self.gate.is_torn_down() {
            return;
        }

        let discarded = self.gate.close();
        if let Some(router) = lock(&self.router).take() {
            router.abort();
        }
        lock(&self.events).take();
        self.surface.stop();

        info!(session = %self.id.short(), discarded, "bridge session torn down");
    }

    // =========================================================================
    // OUTBOUND
    // =========================================================================

    /// Buffer or transmit `message` depending on readiness.
    pub fn send(&self, message: OutboundMessage) {
        self.gate.submit(message);
    }

    /// Build an outbound envelope from a raw tag and payload.
    ///
    /// Unknown tags and payloads of the wrong shape are ignored.
    pub fn send_parts(&self, kind: &str, data: Option<Value>) {
        match OutboundMessage::from_parts(kind, data) {
            Some(message) => self.send(message),
            None => debug!(session = %self.id.short(), kind, "unsupported outbound envelope ignored"),
        }
    }

    pub fn write_output(&self, text: impl Into<String>) {
        self.send(OutboundMessage::Output(text.into()));
    }

    pub fn clear(&self) {
        self.send(OutboundMessage::Clear);
    }

    pub fn focus(&self) {
        self.send(OutboundMessage::Focus);
    }

    pub fn reset(&self) {
        self.send(OutboundMessage::Reset);
    }

    pub fn scroll_to_bottom(&self) {
        self.send(OutboundMessage::ScrollToBottom);
    }

    pub fn set_font_size(&self, size: u32) {
        self.send(OutboundMessage::SetFontSize(size));
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn state(&self) -> SurfaceState {
        self.state.borrow().clone()
    }

    /// Subscribe to presentation state changes.
    pub fn watch_state(&self) -> watch::Receiver<SurfaceState> {
        self.state.subscribe()
    }

    /// Messages waiting for the surface to become ready.
    pub fn pending_len(&self) -> usize {
        self.gate.pending_len()
    }

    pub fn is_ready(&self) -> bool {
        self.gate.is_ready()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn is_torn_down(&self) -> bool {
        self.gate.is_torn_down()
    }
}

impl Drop for BridgeSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
