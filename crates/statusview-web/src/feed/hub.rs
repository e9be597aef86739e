use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use statusview_core::error::{Result, StatusError};
use statusview_core::StatusModel;

use crate::feed::poller::{self, PollTask};
use crate::obs::PollMetrics;
use crate::source::SourceFactory;

/// One running poller.
struct Feed {
    endpoint: String,
    rx: watch::Receiver<StatusModel>,
    cancel: CancellationToken,
    /// Mutated only while holding the feed's map entry.
    subscribers: AtomicUsize,
}

/// Shortest poll interval a hub will run with.
pub const MIN_INTERVAL: Duration = Duration::from_millis(250);

/// Registry of feeds keyed by endpoint URL.
pub struct FeedHub {
    feeds: DashMap<String, Arc<Feed>>,
    factory: Arc<dyn SourceFactory>,
    interval: Duration,
    metrics: Arc<PollMetrics>,
    /// Set by `shutdown`; no feed starts afterwards.
    closed: AtomicBool,
}

impl FeedHub {
    /// Intervals below `MIN_INTERVAL` are raised to it.
    pub fn new(factory: Arc<dyn SourceFactory>, interval: Duration, metrics: Arc<PollMetrics>) -> Arc<Self> {
        let interval = if interval < MIN_INTERVAL {
            tracing::warn!(
                requested_ms = interval.as_millis() as u64,
                min_ms = MIN_INTERVAL.as_millis() as u64,
                "poll interval too short, clamped"
            );
            MIN_INTERVAL
        } else {
            interval
        };

        Arc::new(Self {
            feeds: DashMap::new(),
            factory,
            interval,
            metrics,
            closed: AtomicBool::new(false),
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Join the feed for `endpoint`, starting it if needed.
    ///
    /// After `shutdown` the returned subscription is already closed: it
    /// renders the loading state and `changed` fails at once.
    ///
    /// Must be called inside a tokio runtime.
    pub fn subscribe(self: &Arc<Self>, endpoint: &str) -> Subscription {
        let entry = self.feeds.entry(endpoint.to_string());
        // checked under the entry lock so `shutdown` cannot miss a new feed
        if self.is_closed() {
            drop(entry);
            return self.closed_subscription(endpoint);
        }

        let feed = match entry {
            Entry::Occupied(e) => {
                let feed = Arc::clone(e.get());
                feed.subscribers.fetch_add(1, Ordering::AcqRel);
                feed
            }
            Entry::Vacant(e) => {
                let feed = self.start_feed(endpoint);
                e.insert(Arc::clone(&feed));
                feed
            }
        };

        self.metrics.subscribers.inc(&[("endpoint", endpoint)]);
        Subscription {
            hub: Arc::clone(self),
            rx: feed.rx.clone(),
            feed,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn active_feeds(&self) -> usize {
        self.feeds.len()
    }

    pub fn subscriber_count(&self, endpoint: &str) -> usize {
        self.feeds
            .get(endpoint)
            .map(|f| f.subscribers.load(Ordering::Acquire))
            .unwrap_or(0)
    }

    pub fn total_subscribers(&self) -> usize {
        self.feeds
            .iter()
            .map(|f| f.subscribers.load(Ordering::Acquire))
            .sum()
    }

    /// Cancel every feed and refuse new ones. Live subscriptions see their
    /// feed close.
    pub fn shutdown(&self) {
        self.closed.store(true, Ordering::Release);
        self.feeds.retain(|endpoint, feed| {
            feed.cancel.cancel();
            tracing::info!(%endpoint, "feed cancelled by shutdown");
            false
        });
    }

    fn start_feed(&self, endpoint: &str) -> Arc<Feed> {
        let (tx, rx) = watch::channel(StatusModel::new());
        let cancel = CancellationToken::new();

        tokio::spawn(poller::run(PollTask {
            source: self.factory.source_for(endpoint),
            tx,
            interval: self.interval,
            cancel: cancel.clone(),
            metrics: Arc::clone(&self.metrics),
        }));
        tracing::info!(%endpoint, interval_ms = self.interval.as_millis() as u64, "feed started");

        Arc::new(Feed {
            endpoint: endpoint.to_string(),
            rx,
            cancel,
            subscribers: AtomicUsize::new(1),
        })
    }

    fn closed_subscription(self: &Arc<Self>, endpoint: &str) -> Subscription {
        // sender dropped right away: `changed` reports the feed closed
        let (_, rx) = watch::channel(StatusModel::new());
        let cancel = CancellationToken::new();
        cancel.cancel();
        tracing::debug!(%endpoint, "hub closed, subscription refused");

        let feed = Arc::new(Feed {
            endpoint: endpoint.to_string(),
            rx: rx.clone(),
            cancel,
            subscribers: AtomicUsize::new(1),
        });
        self.metrics.subscribers.inc(&[("endpoint", endpoint)]);
        Subscription {
            hub: Arc::clone(self),
            feed,
            rx,
        }
    }

    fn release(&self, feed: &Arc<Feed>) {
        let last = match self.feeds.entry(feed.endpoint.clone()) {
            Entry::Occupied(e) if Arc::ptr_eq(e.get(), feed) => {
                let last = feed.subscribers.fetch_sub(1, Ordering::AcqRel) == 1;
                if last {
                    e.remove();
                }
                last
            }
            // detached by shutdown, or never registered
            _ => feed.subscribers.fetch_sub(1, Ordering::AcqRel) == 1,
        };

        self.metrics.subscribers.dec(&[("endpoint", feed.endpoint.as_str())]);
        if last {
            feed.cancel.cancel();
            tracing::info!(endpoint = %feed.endpoint, "last subscriber left, feed stopped");
        }
    }
}

/// Scoped handle on a feed. Dropping it releases the feed.
pub struct Subscription {
    hub: Arc<FeedHub>,
    feed: Arc<Feed>,
    rx: watch::Receiver<StatusModel>,
}

impl Subscription {
    pub fn endpoint(&self) -> &str {
        &self.feed.endpoint
    }

    /// Latest published model.
    pub fn current(&self) -> StatusModel {
        self.rx.borrow().clone()
    }

    /// Wait until a model newer than the last one seen is published.
    pub async fn changed(&mut self) -> Result<()> {
        self.rx
            .changed()
            .await
            .map_err(|_| StatusError::Internal(format!("feed closed: {}", self.feed.endpoint)))
    }

    /// Mark the current model as seen without waiting.
    pub fn mark_seen(&mut self) {
        self.rx.borrow_and_update();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.hub.release(&self.feed);
    }
}
