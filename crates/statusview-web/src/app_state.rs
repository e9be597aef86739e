//! Shared application state for the statusview server.
//!
//! Owns the feed hub and the server-mounted page that backs `/status`.
//! WebSocket sessions mount their own pages against the same hub, so every
//! consumer shares one poller.

use std::sync::{Arc, Mutex, MutexGuard};

use statusview_core::display::DisplayOptions;
use statusview_core::error::Result;
use statusview_core::render::PageView;

use crate::config::StatusViewConfig;
use crate::feed::FeedHub;
use crate::obs::PollMetrics;
use crate::source::SourceFactory;
use crate::view::StatusPage;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: StatusViewConfig,
    endpoint: String,
    display: DisplayOptions,
    hub: Arc<FeedHub>,
    metrics: Arc<PollMetrics>,
    /// `None` once drained.
    page: Mutex<Option<StatusPage>>,
}

impl AppState {
    /// Build state and mount the server page (starts polling).
    /// Must be called inside a tokio runtime.
    pub fn new(cfg: StatusViewConfig, factory: Arc<dyn SourceFactory>) -> Result<Self> {
        let display = cfg.display.options()?;
        let endpoint = cfg.api.endpoint_url();
        let metrics = Arc::new(PollMetrics::default());
        let hub = FeedHub::new(factory, cfg.poll.interval(), Arc::clone(&metrics));

        let page = StatusPage::mount(&hub, &endpoint, display);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                endpoint,
                display,
                hub,
                metrics,
                page: Mutex::new(Some(page)),
            }),
        })
    }

    pub fn cfg(&self) -> &StatusViewConfig {
        &self.inner.cfg
    }

    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    pub fn hub(&self) -> Arc<FeedHub> {
        Arc::clone(&self.inner.hub)
    }

    pub fn metrics(&self) -> Arc<PollMetrics> {
        Arc::clone(&self.inner.metrics)
    }

    /// Mount a fresh page for one consumer (e.g. a WebSocket session).
    pub fn mount_page(&self) -> StatusPage {
        StatusPage::mount(&self.inner.hub, &self.inner.endpoint, self.inner.display)
    }

    /// Current view of the server page; `None` while draining.
    pub fn render_page(&self) -> Option<PageView> {
        self.page().as_ref().map(StatusPage::render)
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }

    /// Stop serving: unmount the server page and cancel every feed.
    pub fn begin_drain(&self) {
        self.inner.metrics.set_draining();
        if let Some(page) = self.page().take() {
            page.unmount();
        }
        self.inner.hub.shutdown();
    }

    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        vec![
            ("statusview_feeds_active", self.inner.hub.active_feeds() as u64),
            ("statusview_subscribers_total", self.inner.hub.total_subscribers() as u64),
        ]
    }

    fn page(&self) -> MutexGuard<'_, Option<StatusPage>> {
        self.inner.page.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
