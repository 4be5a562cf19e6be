//! In-memory `SurfaceHost` used by the bridge tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;
use serde_json::Value;
use termview_common::SurfaceError;

use crate::surface::{InboundSink, SurfaceHost};

#[derive(Default)]
pub(crate) struct MockSurface {
    posted: Mutex<Vec<String>>,
    sink: Mutex<Option<InboundSink>>,
    navigated_to: Mutex<Option<String>>,
    create_error: Option<SurfaceError>,
    navigate_error: Option<SurfaceError>,
    /// When set, `navigate` waits for a release or `stop`.
    navigation_hold: Option<Notify>,
    create_calls: AtomicUsize,
    stopped: AtomicBool,
}

impl MockSurface {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn failing_environment(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            create_error: Some(SurfaceError::Environment(reason.into())),
            ..Default::default()
        })
    }

    pub(crate) fn failing_navigation(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            navigate_error: Some(SurfaceError::Navigation(reason.into())),
            ..Default::default()
        })
    }

    pub(crate) fn held_navigation() -> Arc<Self> {
        Arc::new(Self {
            navigation_hold: Some(Notify::new()),
            ..Default::default()
        })
    }

    /// Every posted envelope, parsed back into JSON.
    pub(crate) fn posted(&self) -> Vec<Value> {
        self.posted
            .lock()
            .unwrap()
            .iter()
            .map(|raw| serde_json::from_str(raw).unwrap())
            .collect()
    }

    /// The `data` of every posted `output` envelope, in order.
    pub(crate) fn outputs(&self) -> Vec<String> {
        self.posted()
            .into_iter()
            .filter(|v| v["type"] == "output")
            .map(|v| v["data"].as_str().unwrap().to_string())
            .collect()
    }

    /// Simulate the page posting `raw`. Returns false if nobody subscribed.
    pub(crate) fn deliver(&self, raw: &str) -> bool {
        match self.sink.lock().unwrap().as_ref() {
            Some(sink) => sink.send(raw.to_string()).is_ok(),
            None => false,
        }
    }

    pub(crate) fn is_subscribed(&self) -> bool {
        self.sink.lock().unwrap().is_some()
    }

    pub(crate) fn navigated_to(&self) -> Option<String> {
        self.navigated_to.lock().unwrap().clone()
    }

    pub(crate) fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SurfaceHost for MockSurface {
    async fn create_environment(&self) -> Result<(), SurfaceError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        match &self.create_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    async fn navigate(&self, source: &str) -> Result<(), SurfaceError> {
        if let Some(hold) = &self.navigation_hold {
            hold.notified().await;
            if self.is_stopped() {
                return Err(SurfaceError::TornDown);
            }
        }
        if let Some(e) = &self.navigate_error {
            return Err(e.clone());
        }
        *self.navigated_to.lock().unwrap() = Some(source.to_string());
        Ok(())
    }

    fn post_message(&self, json: &str) -> Result<(), SurfaceError> {
        if self.is_stopped() {
            return Err(SurfaceError::TornDown);
        }
        self.posted.lock().unwrap().push(json.to_string());
        Ok(())
    }

    fn subscribe(&self, sink: InboundSink) {
        *self.sink.lock().unwrap() = Some(sink);
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.sink.lock().unwrap().take();
        if let Some(hold) = &self.navigation_hold {
            hold.notify_one();
        }
    }
}
