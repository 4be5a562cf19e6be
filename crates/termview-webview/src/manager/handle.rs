use wry::WebView;

use crate::error_page::error_page_html;
use crate::ipc::js_deliver_envelope;

/// The live terminal webview. Owned by the UI thread.
pub struct WebViewHandle {
    pub(super) webview: WebView,
    pub(super) current_title: String,
}

impl WebViewHandle {
    pub fn current_title(&self) -> &str {
        &self.current_title
    }

    pub fn load_url(&mut self, url: &str) -> Result<(), wry::Error> {
        self.webview.load_url(url)
    }

    pub fn load_html(&mut self, html: &str) -> Result<(), wry::Error> {
        self.webview.load_html(html)
    }

    /// Replace the page with the error panel for `description`.
    pub fn show_error(&mut self, description: &str) -> Result<(), wry::Error> {
        self.load_html(&error_page_html(description))
    }

    /// Hand a serialized envelope to the page.
    pub fn deliver(&self, json: &str) -> Result<(), wry::Error> {
        self.webview.evaluate_script(&js_deliver_envelope(json))
    }

    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    pub fn focus(&self) -> Result<(), wry::Error> {
        self.webview.focus()
    }

    pub fn set_title(&mut self, title: String) {
        self.current_title = title;
    }
}
