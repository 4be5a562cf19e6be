//! TermviewApp struct definition and constructor.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use termview_bridge::{BridgeEvents, BridgeSession, SurfaceState};
use termview_config::schema::TermviewConfig;
use termview_webview::SurfaceDriver;
use tokio::runtime::Runtime;
use tokio::sync::watch;
use winit::window::Window;

use crate::pty::{PtyHandle, Utf8Decoder};

/// Command-line choices that shape the shell launch.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub execute: Option<String>,
    pub directory: Option<PathBuf>,
}

pub struct TermviewApp {
    pub(super) config: TermviewConfig,
    pub(super) launch: LaunchOptions,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    /// Title last copied from the page, if any.
    pub(super) shown_title: Option<String>,

    // Terminal surface (UI half) and its bridge session
    pub(super) driver: Option<SurfaceDriver>,
    pub(super) session: Option<Arc<BridgeSession>>,
    pub(super) bridge_events: Option<BridgeEvents>,
    pub(super) surface_state: Option<watch::Receiver<SurfaceState>>,

    // Shell
    pub(super) pty: Option<PtyHandle>,
    pub(super) decoder: Utf8Decoder,

    // Live config
    pub(super) config_rx: Option<watch::Receiver<TermviewConfig>>,

    pub(super) runtime: Option<Runtime>,
    pub(super) should_exit: bool,
    pub(super) last_poll: Instant,
}

impl TermviewApp {
    pub fn new(config: TermviewConfig, launch: LaunchOptions, runtime: Runtime) -> Self {
        Self {
            config,
            launch,
            window: None,
            shown_title: None,
            driver: None,
            session: None,
            bridge_events: None,
            surface_state: None,
            pty: None,
            decoder: Utf8Decoder::new(),
            config_rx: None,
            runtime: Some(runtime),
            should_exit: false,
            last_poll: Instant::now(),
        }
    }

    /// Apply configs published by the reload manager.
    pub fn watch_config(&mut self, rx: watch::Receiver<TermviewConfig>) {
        self.config_rx = Some(rx);
    }
}
