//! WebView event types.

use serde::{Deserialize, Serialize};

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    Started,
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events raised by the webview's handlers, drained by the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebViewEvent {
    PageLoad { state: PageLoadState, url: String },
    TitleChanged { title: String },
    /// A JSON envelope posted by the page.
    IpcMessage { body: String },
    /// An allow-listed navigation is about to happen.
    NavigationRequested { url: String },
}
