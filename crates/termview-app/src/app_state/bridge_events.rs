//! Reactions to events raised by the terminal surface.

use termview_bridge::BridgeEvent;

use super::core::TermviewApp;

impl TermviewApp {
    pub(super) fn handle_bridge_event(&mut self, event: BridgeEvent) {
        match event {
            BridgeEvent::InputReceived(text) => {
                let Some(pty) = self.pty.as_mut() else {
                    tracing::debug!(len = text.len(), "Input dropped: no shell");
                    return;
                };
                if let Err(e) = pty.write_input(text.as_bytes()) {
                    tracing::warn!(error = %e, "PTY write failed");
                }
            }
            BridgeEvent::Resized(size) => {
                let Some(pty) = self.pty.as_mut() else {
                    return;
                };
                if pty.size() == size {
                    return;
                }
                match pty.resize(size) {
                    Ok(()) => tracing::debug!(cols = size.cols, rows = size.rows, "PTY resized"),
                    Err(e) => tracing::warn!(error = %e, "PTY resize failed"),
                }
            }
            BridgeEvent::Ready => {
                tracing::info!("Terminal page ready");
                if let Some(session) = &self.session {
                    session.focus();
                }
                if let Some(driver) = &self.driver {
                    driver.focus();
                }
            }
        }
    }
}
