//! Graceful shutdown: tear down the session, kill the shell, stop the runtime.

use std::time::Duration;

use super::core::TermviewApp;

impl TermviewApp {
    /// Shut down every subsystem. Idempotent.
    ///
    /// The session goes first so no more output is posted to a page that is
    /// about to disappear; the webview is then dropped with the driver.
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        if let Some(session) = self.session.take() {
            session.teardown();
        }
        self.bridge_events = None;
        self.surface_state = None;

        if let Some(mut pty) = self.pty.take() {
            pty.kill();
        }

        self.driver = None;
        self.config_rx = None;

        if let Some(rt) = self.runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }

        self.should_exit = true;
        tracing::info!("Graceful shutdown complete");
    }
}

// =============================================================================
// TESTS
// =============================================================================
