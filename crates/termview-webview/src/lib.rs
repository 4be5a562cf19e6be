//! `wry`-backed embedded terminal surface.
//!
//! Provides:
//! - A webview manager that builds the single terminal webview
//! - The JavaScript side of the envelope channel (init script + delivery)
//! - A `termview://` custom protocol serving the bundled terminal page
//! - A navigation allowlist
//! - [`WebViewSurface`], the thread-safe [`SurfaceHost`](termview_bridge::SurfaceHost)
//!   implementation, paired with a [`SurfaceDriver`] pumped on the UI thread

pub mod content;
pub mod error_page;
pub mod events;
pub mod ipc;
pub mod manager;
pub mod surface;

pub use content::ContentProvider;
pub use events::{PageLoadState, WebViewEvent};
pub use manager::{WebViewConfig, WebViewHandle, WebViewManager};
pub use surface::{SurfaceCommand, SurfaceDriver, WebViewSurface};
