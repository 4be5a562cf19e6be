//! Bundled content served via the `termview://` custom protocol.
//!
//! Assets live in memory, so the webview never touches the filesystem.
//! The terminal page is rendered once with the configured font settings.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use termview_config::schema::TerminalConfig;

/// Scheme registered with the webview.
pub const PROTOCOL: &str = "termview";

/// Request path of the bundled terminal page.
pub const TERMINAL_PAGE_PATH: &str = "terminal/index.html";

const TERMINAL_PAGE_TEMPLATE: &str = include_str!("../assets/terminal/index.html");

/// Resolves `termview://` request paths to in-memory assets.
#[derive(Debug, Default)]
pub struct ContentProvider {
    assets: HashMap<String, (String, Vec<u8>)>, // path -> (mime, data)
}

impl ContentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider serving the terminal page rendered for `terminal`.
    pub fn bundled(terminal: &TerminalConfig) -> Self {
        let mut provider = Self::new();
        provider.add_asset(TERMINAL_PAGE_PATH, render_terminal_page(terminal));
        provider
    }

    /// Register (or replace) an asset. The MIME type is guessed from the path.
    pub fn add_asset(&mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) {
        let path = path.into();
        let mime = mime_from_extension(Path::new(&path)).to_string();
        self.assets.insert(path, (mime, data.into()));
    }

    pub fn resolve(&self, path: &str) -> Option<(Cow<'_, str>, Cow<'_, [u8]>)> {
        let clean = path.split(['?', '#']).next().unwrap_or("");
        let clean = clean.trim_start_matches('/');
        self.assets
            .get(clean)
            .map(|(mime, data)| (Cow::Borrowed(mime.as_str()), Cow::Borrowed(data.as_slice())))
    }

    /// Resolve a full `termview://` URI as received by the protocol handler.
    pub fn resolve_uri(&self, uri: &str) -> Option<(Cow<'_, str>, Cow<'_, [u8]>)> {
        self.resolve(request_path(uri))
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Strip the scheme and host from a protocol request URI.
///
/// WebView2 on Windows rewrites `termview://localhost/...` into
/// `http://termview.localhost/...`, so both spellings are accepted.
pub fn request_path(uri: &str) -> &str {
    uri.strip_prefix("termview://localhost/")
        .or_else(|| uri.strip_prefix("termview://localhost"))
        .or_else(|| uri.strip_prefix("http://termview.localhost/"))
        .or_else(|| uri.strip_prefix("termview:///"))
        .or_else(|| uri.strip_prefix("termview://"))
        .unwrap_or("")
}

/// Fill the terminal page template with font settings.
pub fn render_terminal_page(terminal: &TerminalConfig) -> String {
    TERMINAL_PAGE_TEMPLATE
        .replace("{{FONT_FAMILY}}", &js_string_literal(&terminal.font_family))
        .replace("{{FONT_SIZE}}", &terminal.font_size.to_string())
}

/// A JSON string literal that cannot close the surrounding `<script>`.
fn js_string_literal(value: &str) -> String {
    serde_json::Value::from(value)
        .to_string()
        .replace('<', "\\u003c")
}

/// Guess MIME type from file extension.
pub fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        _ => "application/octet-stream",
    }
}
