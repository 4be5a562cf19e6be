//! WebView construction and event collection.
//!
//! `WebViewManager` builds the terminal `wry::WebView` and collects the
//! events its handlers raise until the UI loop drains them.

use std::sync::Arc;

use crate::content::ContentProvider;
use crate::events::WebViewEvent;

mod handle;
pub mod handlers;
mod lifecycle;
mod types;

pub use handle::WebViewHandle;
pub use handlers::EventQueue;
pub use types::WebViewConfig;

pub struct WebViewManager {
    pub(crate) events: EventQueue,
    /// Provider for the `termview://` custom protocol.
    content_provider: Option<Arc<ContentProvider>>,
}

impl WebViewManager {
    pub fn new() -> Self {
        Self {
            events: EventQueue::default(),
            content_provider: None,
        }
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        self.events.drain()
    }

    /// Set the provider serving bundled assets via `termview://`.
    pub fn set_content_provider(&mut self, provider: ContentProvider) {
        self.content_provider = Some(Arc::new(provider));
    }

    pub fn content_provider(&self) -> Option<&ContentProvider> {
        self.content_provider.as_deref()
    }
}

impl Default for WebViewManager {
    fn default() -> Self {
        Self::new()
    }
}
