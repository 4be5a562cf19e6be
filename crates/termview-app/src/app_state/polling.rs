//! Periodic polling: surface commands, bridge events, PTY output, reloads.

use std::time::Instant;

use termview_bridge::SurfaceState;
use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::bounds::window_bounds;
use super::core::TermviewApp;
use super::types::{exit_banner, POLL_INTERVAL};

impl TermviewApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.pump_surface();
            self.poll_bridge_events();
            self.poll_surface_state();
            self.poll_pty_output();
            self.poll_config_reload();
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }

    /// Apply queued surface commands on the UI thread.
    fn pump_surface(&mut self) {
        if let (Some(window), Some(driver)) = (&self.window, &mut self.driver) {
            driver.pump(window.as_ref(), window_bounds(window.inner_size()));
        }
        self.sync_window_title();
    }

    /// Mirror the page title (set by the shell via OSC 0/2) onto the window.
    fn sync_window_title(&mut self) {
        let Some(title) = self.driver.as_ref().and_then(|d| d.page_title()) else {
            return;
        };
        if self.shown_title.as_deref() == Some(title) {
            return;
        }
        if let Some(window) = &self.window {
            window.set_title(title);
        }
        self.shown_title = Some(title.to_string());
    }

    pub(super) fn poll_bridge_events(&mut self) {
        let mut pending = Vec::new();
        if let Some(events) = self.bridge_events.as_mut() {
            while let Ok(event) = events.try_recv() {
                pending.push(event);
            }
        }
        for event in pending {
            self.handle_bridge_event(event);
        }
    }

    fn poll_surface_state(&mut self) {
        let Some(state_rx) = self.surface_state.as_mut() else {
            return;
        };
        if !state_rx.has_changed().unwrap_or(false) {
            return;
        }
        let state = state_rx.borrow_and_update().clone();

        match state {
            SurfaceState::Loading => {}
            SurfaceState::Visible => tracing::info!("Terminal surface visible"),
            SurfaceState::Error(description) => {
                tracing::error!(error = %description, "Terminal surface failed");
                if let Some(driver) = self.driver.as_mut() {
                    driver.show_error(&description);
                }
                if let Some(window) = &self.window {
                    window.set_title(&format!("{} (error)", self.config.window.title));
                }
            }
        }
    }

    pub(super) fn poll_pty_output(&mut self) {
        let Some(pty) = self.pty.as_mut() else {
            return;
        };

        let output = pty.drain_output();
        let finished = pty.is_finished();
        let exit_code = if finished { pty.try_exit_code() } else { None };

        let text = self.decoder.decode(&output);
        if let Some(session) = &self.session {
            if !text.is_empty() {
                session.write_output(text);
            }
            if finished {
                session.write_output(exit_banner(exit_code));
            }
        }

        if finished {
            tracing::info!(
                exit_code = ?exit_code,
                undecoded = self.decoder.pending_len(),
                "Shell exited"
            );
            self.pty = None;
        }
    }

    fn poll_config_reload(&mut self) {
        let Some(config_rx) = self.config_rx.as_mut() else {
            return;
        };
        if !config_rx.has_changed().unwrap_or(false) {
            return;
        }
        let new_config = config_rx.borrow_and_update().clone();

        let new_size = new_config.terminal.font_size;
        if new_size != self.config.terminal.font_size {
            tracing::info!(font_size = new_size, "Font size changed, updating terminal");
            if let Some(session) = &self.session {
                session.set_font_size(new_size);
            }
        }
        self.config = new_config;
    }
}
