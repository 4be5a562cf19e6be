//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Coordinates the window, the terminal webview, its bridge
//! session, the shell PTY, and config reloads.

mod bounds;
mod bridge_events;
mod core;
mod event_handler;
mod init;
mod polling;
mod shutdown;
mod types;

pub use core::{LaunchOptions, TermviewApp};
