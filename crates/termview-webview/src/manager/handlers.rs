//! Callbacks wired into the `wry` builder and the queue they feed.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::events::{PageLoadState, WebViewEvent};

/// URL prefixes the terminal webview may navigate to. The CDN entries
/// cover xterm.js and its addons; `termview.localhost` is how WebView2
/// spells the custom scheme.
pub const NAVIGATION_ALLOWLIST: &[&str] = &[
    "termview://",
    "http://termview.localhost",
    "about:blank",
    "https://cdn.jsdelivr.net/",
    "https://unpkg.com/",
];

pub fn is_navigation_allowed(url: &str) -> bool {
    NAVIGATION_ALLOWLIST.iter().any(|p| url.starts_with(p))
}

/// Shared buffer between the `wry` callbacks and the UI loop.
#[derive(Clone, Default)]
pub struct EventQueue(Arc<Mutex<Vec<WebViewEvent>>>);

impl EventQueue {
    pub fn push(&self, event: WebViewEvent) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).push(event);
    }

    pub fn drain(&self) -> Vec<WebViewEvent> {
        std::mem::take(&mut *self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Page posts must at least be JSON; the envelope shape is checked later.
fn ipc_event(body: String) -> Option<WebViewEvent> {
    if serde_json::from_str::<serde_json::Value>(&body).is_err() {
        warn!(len = body.len(), "dropping non-JSON post from page");
        return None;
    }
    Some(WebViewEvent::IpcMessage { body })
}

pub(super) fn wire<'a>(builder: WebViewBuilder<'a>, queue: &EventQueue) -> WebViewBuilder<'a> {
    let (ipc, load, title, nav) = (queue.clone(), queue.clone(), queue.clone(), queue.clone());

    builder
        .with_ipc_handler(move |request| {
            if let Some(event) = ipc_event(request.body().clone()) {
                ipc.push(event);
            }
        })
        .with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(?state, %url, "page load");
            load.push(WebViewEvent::PageLoad { state, url });
        })
        .with_document_title_changed_handler(move |new_title| {
            title.push(WebViewEvent::TitleChanged { title: new_title });
        })
        .with_navigation_handler(move |url| {
            if !is_navigation_allowed(&url) {
                warn!(%url, "blocked navigation");
                return false;
            }
            nav.push(WebViewEvent::NavigationRequested { url });
            true
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_page_and_cdn_are_allowed() {
        for url in [
            "termview://localhost/terminal/index.html",
            "http://termview.localhost/terminal/index.html",
            "about:blank",
            "https://cdn.jsdelivr.net/npm/@xterm/xterm@5.5.0/lib/xterm.js",
            "https://unpkg.com/@xterm/addon-fit",
        ] {
            assert!(is_navigation_allowed(url), "{url}");
        }
    }

    #[test]
    fn everything_else_is_blocked() {
        for url in [
            "",
            "termview",
            "https://example.com",
            "http://localhost:8080",
            "https://cdn.jsdelivr.net.evil.io/",
            "file:///etc/passwd",
            "javascript:alert(1)",
            "data:text/html,<h1>x</h1>",
        ] {
            assert!(!is_navigation_allowed(url), "{url}");
        }
    }

    #[test]
    fn ipc_posts_must_be_json() {
        assert!(ipc_event("not json".into()).is_none());
        assert_eq!(
            ipc_event(r#"{"type":"ready"}"#.into()),
            Some(WebViewEvent::IpcMessage {
                body: r#"{"type":"ready"}"#.into()
            })
        );
    }

    #[test]
    fn queue_drains_in_push_order() {
        let queue = EventQueue::default();
        let producer = queue.clone();
        producer.push(WebViewEvent::TitleChanged { title: "a".into() });
        producer.push(WebViewEvent::NavigationRequested { url: "about:blank".into() });

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0], WebViewEvent::TitleChanged { title: "a".into() });
        assert!(queue.drain().is_empty());
    }
}
