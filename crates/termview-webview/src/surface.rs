//! Thread-safe `SurfaceHost` over a UI-thread webview.
//!
//! `wry::WebView` must stay on the thread that created it, but the bridge
//! session runs on the async runtime. [`WebViewSurface`] is the `Send + Sync`
//! half: it queues [`SurfaceCommand`]s and awaits replies. [`SurfaceDriver`]
//! is the UI half: the event loop calls [`SurfaceDriver::pump`] each poll to
//! apply queued commands and forward page events.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use termview_bridge::{InboundSink, SurfaceHost};
use termview_common::SurfaceError;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};
use wry::raw_window_handle;

use crate::content::request_path;
use crate::events::{PageLoadState, WebViewEvent};
use crate::manager::handlers::is_navigation_allowed;
use crate::manager::{WebViewConfig, WebViewHandle, WebViewManager};

/// How long `navigate` waits for the page to finish loading.
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

type Reply = oneshot::Sender<Result<(), SurfaceError>>;
type SharedSink = Arc<Mutex<Option<InboundSink>>>;

fn lock_sink(sink: &SharedSink) -> MutexGuard<'_, Option<InboundSink>> {
    sink.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Work queued for the UI thread.
#[derive(Debug)]
pub enum SurfaceCommand {
    Create { reply: Reply },
    Navigate { url: String, reply: Reply },
    Post(String),
    Stop,
}

// =============================================================================
// ASYNC HALF
// =============================================================================

pub struct WebViewSurface {
    commands: mpsc::Sender<SurfaceCommand>,
    sink: SharedSink,
    stopped: AtomicBool,
    navigation_timeout: Duration,
}

impl WebViewSurface {
    /// Create a surface and the driver that must live on the UI thread.
    pub fn channel(manager: WebViewManager, config: WebViewConfig) -> (Self, SurfaceDriver) {
        let (commands_tx, commands_rx) = mpsc::channel();
        let sink: SharedSink = Arc::new(Mutex::new(None));

        let surface = Self {
            commands: commands_tx,
            sink: Arc::clone(&sink),
            stopped: AtomicBool::new(false),
            navigation_timeout: NAVIGATION_TIMEOUT,
        };
        let driver = SurfaceDriver {
            commands: commands_rx,
            manager,
            config,
            handle: None,
            sink,
            pending_navigation: None,
            stopped: false,
        };
        (surface, driver)
    }

    pub fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    fn queue(&self, command: SurfaceCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    async fn request(
        &self,
        build: impl FnOnce(Reply) -> SurfaceCommand,
        closed: impl Fn(String) -> SurfaceError,
    ) -> Result<(), SurfaceError> {
        if self.stopped.load(Ordering::SeqCst) {
            return Err(SurfaceError::TornDown);
        }
        let (reply, response) = oneshot::channel();
        if !self.queue(build(reply)) {
            return Err(closed("UI loop is not running".into()));
        }
        response
            .await
            .unwrap_or_else(|_| Err(closed("UI loop dropped the request".into())))
    }
}

#[async_trait]
impl SurfaceHost for WebViewSurface {
    async fn create_environment(&self) -> Result<(), SurfaceError> {
        self.request(|reply| SurfaceCommand::Create { reply }, SurfaceError::Environment)
            .await
    }

    async fn navigate(&self, source: &str) -> Result<(), SurfaceError> {
        let url = source.to_string();
        let load = self.request(
            |reply| SurfaceCommand::Navigate { url, reply },
            SurfaceError::Navigation,
        );
        match tokio::time::timeout(self.navigation_timeout, load).await {
            Ok(result) => result,
            Err(_) => Err(SurfaceError::Navigation(format!(
                "{source} did not finish loading within {}s",
                self.navigation_timeout.as_secs()
            ))),
        }
    }

    fn post_message(&self, json: &str) -> Result<(), SurfaceError> {
        if self.stopped.load(Ordering::SeqCst) {
            return Err(SurfaceError::TornDown);
        }
        if self.queue(SurfaceCommand::Post(json.to_string())) {
            Ok(())
        } else {
            Err(SurfaceError::PostMessage("UI loop is not running".into()))
        }
    }

    fn subscribe(&self, sink: InboundSink) {
        *lock_sink(&self.sink) = Some(sink);
    }

    fn stop(&self) {
        if self.stopped.swap(true, Ordering::SeqCst) {
            return;
        }
        lock_sink(&self.sink).take();
        self.queue(SurfaceCommand::Stop);
    }
}

/// Whether a finished load of `loaded` completes navigation to `target`.
/// Bundled pages compare by path so WebView2's `http://termview.localhost`
/// spelling matches `termview://localhost`.
fn same_page(target: &str, loaded: &str) -> bool {
    let (target_path, loaded_path) = (request_path(target), request_path(loaded));
    if !target_path.is_empty() || !loaded_path.is_empty() {
        return target_path == loaded_path;
    }
    target.trim_end_matches('/') == loaded.trim_end_matches('/')
}

// =============================================================================
// UI HALF
// =============================================================================

pub struct SurfaceDriver {
    commands: mpsc::Receiver<SurfaceCommand>,
    manager: WebViewManager,
    config: WebViewConfig,
    handle: Option<WebViewHandle>,
    sink: SharedSink,
    pending_navigation: Option<(String, Reply)>,
    stopped: bool,
}

impl SurfaceDriver {
    /// Apply queued commands, then route page events. Call on the UI thread.
    pub fn pump<W: raw_window_handle::HasWindowHandle>(&mut self, window: &W, bounds: wry::Rect) {
        while let Ok(command) = self.commands.try_recv() {
            self.apply(command, window, bounds);
        }
        for event in self.manager.drain_events() {
            self.handle_event(event);
        }
    }

    fn apply<W: raw_window_handle::HasWindowHandle>(
        &mut self,
        command: SurfaceCommand,
        window: &W,
        bounds: wry::Rect,
    ) {
        match command {
            SurfaceCommand::Create { reply } => {
                let result = self.create(window, bounds);
                let _ = reply.send(result);
            }
            SurfaceCommand::Navigate { url, reply } => self.navigate(url, reply),
            SurfaceCommand::Post(json) => self.post(&json),
            SurfaceCommand::Stop => self.stop(),
        }
    }

    fn create<W: raw_window_handle::HasWindowHandle>(
        &mut self,
        window: &W,
        bounds: wry::Rect,
    ) -> Result<(), SurfaceError> {
        if self.stopped {
            return Err(SurfaceError::TornDown);
        }
        if self.handle.is_some() {
            return Ok(());
        }
        let handle = self
            .manager
            .create(window, bounds, &self.config)
            .map_err(|e| SurfaceError::Environment(e.to_string()))?;
        self.handle = Some(handle);
        info!("surface environment created");
        Ok(())
    }

    fn navigate(&mut self, url: String, reply: Reply) {
        if self.stopped {
            let _ = reply.send(Err(SurfaceError::TornDown));
            return;
        }
        if !is_navigation_allowed(&url) {
            warn!(url = %url, "navigation refused: URL not in allowlist");
            let _ = reply.send(Err(SurfaceError::Navigation(format!(
                "{url} is not an allowed source"
            ))));
            return;
        }
        let Some(handle) = self.handle.as_mut() else {
            let _ = reply.send(Err(SurfaceError::Navigation(
                "no surface environment to navigate".into(),
            )));
            return;
        };

        if let Err(e) = handle.load_url(&url) {
            let _ = reply.send(Err(SurfaceError::Navigation(e.to_string())));
            return;
        }

        debug!(url = %url, "navigation started");
        if let Some((previous, superseded)) = self.pending_navigation.replace((url, reply)) {
            let _ = superseded.send(Err(SurfaceError::Navigation(format!(
                "navigation to {previous} was superseded"
            ))));
        }
    }

    fn post(&self, json: &str) {
        if self.stopped {
            return;
        }
        match &self.handle {
            Some(handle) => {
                if let Err(e) = handle.deliver(json) {
                    warn!(error = %e, body_len = json.len(), "failed to deliver envelope to page");
                }
            }
            None => debug!(body_len = json.len(), "no webview, envelope dropped"),
        }
    }

    fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        if let Some((_, reply)) = self.pending_navigation.take() {
            let _ = reply.send(Err(SurfaceError::TornDown));
        }
        lock_sink(&self.sink).take();
        self.handle = None;
        info!("surface stopped");
    }

    fn handle_event(&mut self, event: WebViewEvent) {
        match event {
            WebViewEvent::IpcMessage { body } => {
                let delivered = lock_sink(&self.sink)
                    .as_ref()
                    .is_some_and(|sink| sink.send(body).is_ok());
                if !delivered {
                    debug!("no inbound subscriber, IPC message dropped");
                }
            }
            WebViewEvent::PageLoad {
                state: PageLoadState::Finished,
                url,
            } => {
                match self.pending_navigation.take() {
                    Some((target, reply)) if same_page(&target, &url) => {
                        debug!(url = %url, "navigation finished");
                        let _ = reply.send(Ok(()));
                    }
                    pending => {
                        debug!(url = %url, "unrelated page load finished");
                        self.pending_navigation = pending;
                    }
                }
            }
            WebViewEvent::PageLoad { .. } => {}
            WebViewEvent::TitleChanged { title } => {
                if let Some(handle) = self.handle.as_mut() {
                    handle.set_title(title);
                }
            }
            WebViewEvent::NavigationRequested { url } => {
                debug!(url = %url, "page navigating");
            }
        }
    }

    // =========================================================================
    // UI-ONLY OPERATIONS
    // =========================================================================

    /// Replace the page with the error panel. No-op without a webview.
    pub fn show_error(&mut self, description: &str) {
        if let Some(handle) = self.handle.as_mut() {
            if let Err(e) = handle.show_error(description) {
                warn!(error = %e, "failed to load error panel");
            }
        }
    }

    pub fn set_bounds(&self, bounds: wry::Rect) {
        if let Some(handle) = &self.handle {
            if let Err(e) = handle.set_bounds(bounds) {
                warn!(error = %e, "failed to resize webview");
            }
        }
    }

    pub fn focus(&self) {
        if let Some(handle) = &self.handle {
            if let Err(e) = handle.focus() {
                debug!(error = %e, "failed to focus webview");
            }
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn page_title(&self) -> Option<&str> {
        self.handle
            .as_ref()
            .map(WebViewHandle::current_title)
            .filter(|t| !t.is_empty())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc as tokio_mpsc;

    fn pair() -> (WebViewSurface, SurfaceDriver) {
        WebViewSurface::channel(WebViewManager::new(), WebViewConfig::default())
    }

    fn queued(driver: &SurfaceDriver) -> Vec<SurfaceCommand> {
        driver.commands.try_iter().collect()
    }

    #[test]
    fn post_message_queues_for_ui_thread() {
        let (surface, driver) = pair();
        surface.post_message(r#"{"type":"clear"}"#).unwrap();

        match queued(&driver).as_slice() {
            [SurfaceCommand::Post(json)] => assert_eq!(json, r#"{"type":"clear"}"#),
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[test]
    fn stop_rejects_later_posts_and_queues_once() {
        let (surface, driver) = pair();
        surface.stop();
        surface.stop();

        assert_eq!(
            surface.post_message("{}"),
            Err(SurfaceError::TornDown)
        );
        let commands = queued(&driver);
        assert_eq!(commands.len(), 1);
        assert!(matches!(commands[0], SurfaceCommand::Stop));
    }

    #[test]
    fn post_fails_when_driver_is_gone() {
        let (surface, driver) = pair();
        drop(driver);
        assert!(matches!(
            surface.post_message("{}"),
            Err(SurfaceError::PostMessage(_))
        ));
    }

    #[tokio::test]
    async fn create_resolves_with_driver_reply() {
        let (surface, driver) = pair();
        // The webview half is !Send; only the command queue crosses threads.
        let SurfaceDriver { commands, .. } = driver;

        let responder = tokio::task::spawn_blocking(move || {
            let command = commands.recv().unwrap();
            match command {
                SurfaceCommand::Create { reply } => {
                    reply
                        .send(Err(SurfaceError::Environment("no display".into())))
                        .unwrap();
                }
                other => panic!("unexpected command: {other:?}"),
            }
        });

        let result = surface.create_environment().await;
        responder.await.unwrap();
        assert_eq!(result, Err(SurfaceError::Environment("no display".into())));
    }

    #[tokio::test]
    async fn create_fails_when_driver_is_gone() {
        let (surface, driver) = pair();
        drop(driver);
        assert!(matches!(
            surface.create_environment().await,
            Err(SurfaceError::Environment(_))
        ));
    }

    #[tokio::test]
    async fn navigate_times_out_without_page_load() {
        let (surface, _driver) = pair();
        let surface = surface.with_navigation_timeout(Duration::from_millis(20));

        match surface.navigate("termview://localhost/terminal/index.html").await {
            Err(SurfaceError::Navigation(msg)) => assert!(msg.contains("did not finish")),
            other => panic!("expected navigation timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn navigate_refuses_sources_outside_allowlist() {
        let (surface, mut driver) = pair();
        let (reply, response) = oneshot::channel();
        driver.navigate("https://example.com/".into(), reply);
        assert!(matches!(
            response.await.unwrap(),
            Err(SurfaceError::Navigation(_))
        ));
        drop(surface);
    }

    #[tokio::test]
    async fn navigate_without_webview_fails() {
        let (_surface, mut driver) = pair();
        let (reply, response) = oneshot::channel();
        driver.navigate("termview://localhost/terminal/index.html".into(), reply);
        assert!(matches!(
            response.await.unwrap(),
            Err(SurfaceError::Navigation(_))
        ));
    }

    #[tokio::test]
    async fn page_load_finished_resolves_pending_navigation() {
        let (_surface, mut driver) = pair();
        let (reply, response) = oneshot::channel();
        driver.pending_navigation = Some(("termview://localhost/terminal/index.html".into(), reply));

        driver.handle_event(WebViewEvent::PageLoad {
            state: PageLoadState::Started,
            url: "termview://localhost/terminal/index.html".into(),
        });
        assert!(driver.pending_navigation.is_some());

        driver.handle_event(WebViewEvent::PageLoad {
            state: PageLoadState::Finished,
            url: "termview://localhost/terminal/index.html".into(),
        });
        assert_eq!(response.await.unwrap(), Ok(()));
    }

    #[test]
    fn blank_page_load_leaves_navigation_pending() {
        let (_surface, mut driver) = pair();
        let (reply, mut response) = oneshot::channel();
        driver.pending_navigation = Some(("termview://localhost/terminal/index.html".into(), reply));

        driver.handle_event(WebViewEvent::PageLoad {
            state: PageLoadState::Finished,
            url: "about:blank".into(),
        });

        assert!(driver.pending_navigation.is_some());
        assert!(matches!(
            response.try_recv(),
            Err(oneshot::error::TryRecvError::Empty)
        ));
    }

    #[test]
    fn webview2_spelling_completes_bundled_navigation() {
        let (_surface, mut driver) = pair();
        let (reply, mut response) = oneshot::channel();
        driver.pending_navigation = Some(("termview://localhost/terminal/index.html".into(), reply));

        driver.handle_event(WebViewEvent::PageLoad {
            state: PageLoadState::Finished,
            url: "http://termview.localhost/terminal/index.html".into(),
        });

        assert_eq!(response.try_recv().unwrap(), Ok(()));
    }

    #[test]
    fn same_page_matching() {
        assert!(same_page("about:blank", "about:blank"));
        assert!(same_page("https://unpkg.com/x/", "https://unpkg.com/x"));
        assert!(!same_page("termview://localhost/terminal/index.html", "about:blank"));
        assert!(!same_page("about:blank", "termview://localhost/terminal/index.html"));
        assert!(!same_page(
            "termview://localhost/terminal/index.html",
            "termview://localhost/other.html"
        ));
    }

    #[test]
    fn ipc_messages_reach_subscriber() {
        let (surface, mut driver) = pair();
        let (tx, mut rx) = tokio_mpsc::unbounded_channel();
        surface.subscribe(tx);

        driver.handle_event(WebViewEvent::IpcMessage {
            body: r#"{"type":"input","data":"ls"}"#.into(),
        });

        assert_eq!(rx.try_recv().unwrap(), r#"{"type":"input","data":"ls"}"#);
    }

    #[tokio::test]
    async fn stop_fails_pending_navigation_and_drops_subscriber() {
        let (surface, mut driver) = pair();
        let (tx, mut rx) = tokio_mpsc::unbounded_channel();
        surface.subscribe(tx);
        let (reply, response) = oneshot::channel();
        driver.pending_navigation = Some(("termview://localhost/".into(), reply));

        driver.stop();

        assert!(driver.is_stopped());
        assert_eq!(response.await.unwrap(), Err(SurfaceError::TornDown));
        driver.handle_event(WebViewEvent::IpcMessage { body: "{}".into() });
        assert!(rx.try_recv().is_err());
        drop(surface);
    }
}
