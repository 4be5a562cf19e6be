//! Window creation, terminal surface setup, and shell spawn.

use std::sync::Arc;

use termview_bridge::{BridgeSession, SessionOptions, SurfaceHost};
use termview_webview::{ContentProvider, WebViewConfig, WebViewManager, WebViewSurface};
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use crate::pty::{spawn_pty, ShellLaunch};

use super::core::TermviewApp;

impl TermviewApp {
    /// Create the main window.
    /// Returns `false` if creation failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let window_config = &self.config.window;
        let attrs = WindowAttributes::default()
            .with_title(window_config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                f64::from(window_config.width),
                f64::from(window_config.height),
            ));

        match event_loop.create_window(attrs) {
            Ok(w) => {
                self.window = Some(Arc::new(w));
                tracing::info!("Window created");
                true
            }
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                false
            }
        }
    }

    /// Build the webview surface and its bridge session, then start
    /// initialization on the runtime. The webview itself is created when
    /// the UI loop next pumps the driver.
    pub(super) fn initialize_surface(&mut self) {
        let mut manager = WebViewManager::new();
        manager.set_content_provider(ContentProvider::bundled(&self.config.terminal));

        let (surface, driver) =
            WebViewSurface::channel(manager, WebViewConfig::from_settings(&self.config.webview));
        let surface: Arc<dyn SurfaceHost> = Arc::new(surface);

        let (session, events) =
            BridgeSession::new(surface, SessionOptions::from_config(&self.config));
        let session = Arc::new(session);

        // Buffered until the page reports ready.
        session.set_font_size(self.config.terminal.font_size);

        self.surface_state = Some(session.watch_state());
        self.bridge_events = Some(events);
        self.driver = Some(driver);

        if let Some(runtime) = &self.runtime {
            let task_session = Arc::clone(&session);
            runtime.spawn(async move {
                if let Err(e) = task_session.initialize().await {
                    tracing::debug!(error = %e, "Initialization task finished with error");
                }
            });
        }

        tracing::info!(session = %session.id().short(), "Terminal surface initializing");
        self.session = Some(session);
    }

    /// Start the shell. Output produced before the page is ready is
    /// buffered by the session.
    pub(super) fn spawn_shell(&mut self) {
        let launch = ShellLaunch::from_config(
            &self.config.shell,
            self.launch.execute.clone(),
            self.launch.directory.clone(),
        );

        match spawn_pty(&launch, self.config.terminal.default_size()) {
            Ok(handle) => self.pty = Some(handle),
            Err(e) => {
                tracing::error!(error = %e, "Failed to start shell");
                if let Some(session) = &self.session {
                    session.write_output(format!("\r\n[failed to start shell: {e}]\r\n"));
                }
            }
        }
    }
}
