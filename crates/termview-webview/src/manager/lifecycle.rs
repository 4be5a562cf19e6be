use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, warn};
use wry::http::{Response, StatusCode};
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::content::{request_path, ContentProvider, PROTOCOL};
use crate::ipc::IPC_INIT_SCRIPT;

use super::handle::WebViewHandle;
use super::handlers;
use super::types::WebViewConfig;
use super::WebViewManager;

impl WebViewManager {
    /// Create the terminal webview as a child of `window`, positioned at
    /// `bounds`. It starts on `about:blank`; navigation happens separately.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        window: &W,
        bounds: wry::Rect,
        config: &WebViewConfig,
    ) -> Result<WebViewHandle, wry::Error> {
        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_transparent(config.transparent)
            .with_devtools(config.devtools)
            .with_clipboard(config.clipboard)
            .with_focused(true)
            .with_initialization_script(IPC_INIT_SCRIPT);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = handlers::wire(builder, &self.events);
        builder = self.attach_custom_protocol(builder);

        let webview = builder.with_url("about:blank").build_as_child(window)?;

        debug!("terminal webview created");

        Ok(WebViewHandle {
            webview,
            current_title: String::new(),
        })
    }

    fn attach_custom_protocol<'a>(&self, builder: WebViewBuilder<'a>) -> WebViewBuilder<'a> {
        let Some(provider) = &self.content_provider else {
            return builder;
        };
        let provider = Arc::clone(provider);

        builder.with_custom_protocol(PROTOCOL.to_string(), move |_webview_id, request| {
            let uri = request.uri().to_string();
            serve(&provider, &uri)
        })
    }
}

fn serve(provider: &ContentProvider, uri: &str) -> Response<Cow<'static, [u8]>> {
    let response = match provider.resolve_uri(uri) {
        Some((mime, data)) => Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", mime.as_ref())
            .header("Access-Control-Allow-Origin", "termview://localhost")
            .body(Cow::Owned(data.into_owned())),
        None => {
            warn!(path = %request_path(uri), "custom protocol: asset not found");
            Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Cow::Borrowed(&b"Not Found"[..]))
        }
    };

    response.unwrap_or_else(|e| {
        warn!(error = %e, "custom protocol: failed to build response");
        let mut fallback = Response::new(Cow::Borrowed(&b""[..]));
        *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use termview_config::schema::TerminalConfig;

    #[test]
    fn serve_returns_bundled_page() {
        let provider = ContentProvider::bundled(&TerminalConfig::default());
        let response = serve(&provider, "termview://localhost/terminal/index.html");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Content-Type"], "text/html");
        assert!(!response.body().is_empty());
    }

    #[test]
    fn serve_missing_asset_is_404() {
        let provider = ContentProvider::bundled(&TerminalConfig::default());
        let response = serve(&provider, "termview://localhost/nope.js");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
