//! Scripted status sources for feed tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use statusview_core::error::{Result, StatusError};
use statusview_core::StatusSnapshot;
use statusview_web::source::{SourceFactory, StatusSource};

pub fn snapshot(active: i64) -> StatusSnapshot {
    StatusSnapshot {
        updated_at: "2024-01-01T12:00:00Z".into(),
        db_version: "14.2".into(),
        max_connections: 100,
        active_connections: active,
    }
}

pub fn network_down() -> StatusError {
    StatusError::Network("connection refused".into())
}

/// Replays queued outcomes; the last one repeats forever.
pub struct ScriptedSource {
    endpoint: String,
    outcomes: Mutex<VecDeque<Result<StatusSnapshot>>>,
    last: Mutex<Option<Result<StatusSnapshot>>>,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusSource for ScriptedSource {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch(&self) -> Result<StatusSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let next = self.outcomes.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        match next {
            Some(outcome) => {
                *last = Some(outcome.clone());
                outcome
            }
            None => last.clone().unwrap_or_else(|| Err(network_down())),
        }
    }
}

/// Hands out one scripted source per endpoint and remembers them.
#[derive(Default)]
pub struct ScriptedFactory {
    scripts: Mutex<Vec<(String, Vec<Result<StatusSnapshot>>, Duration)>>,
    built: Mutex<Vec<Arc<ScriptedSource>>>,
}

impl ScriptedFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn script(&self, endpoint: &str, outcomes: Vec<Result<StatusSnapshot>>) {
        self.script_delayed(endpoint, outcomes, Duration::ZERO);
    }

    pub fn script_delayed(&self, endpoint: &str, outcomes: Vec<Result<StatusSnapshot>>, delay: Duration) {
        self.scripts.lock().unwrap().push((endpoint.to_string(), outcomes, delay));
    }

    /// Every source built so far for `endpoint` (one per feed start).
    pub fn sources(&self, endpoint: &str) -> Vec<Arc<ScriptedSource>> {
        self.built
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.endpoint == endpoint)
            .cloned()
            .collect()
    }

    pub fn total_calls(&self, endpoint: &str) -> usize {
        self.sources(endpoint).iter().map(|s| s.calls()).sum()
    }
}

impl SourceFactory for ScriptedFactory {
    fn source_for(&self, endpoint: &str) -> Arc<dyn StatusSource> {
        let (outcomes, delay) = self
            .scripts
            .lock()
            .unwrap()
            .iter()
            .find(|(e, _, _)| e == endpoint)
            .map(|(_, o, d)| (o.clone(), *d))
            .unwrap_or_default();

        let source = Arc::new(ScriptedSource {
            endpoint: endpoint.to_string(),
            outcomes: Mutex::new(outcomes.into()),
            last: Mutex::new(None),
            delay,
            calls: AtomicUsize::new(0),
        });
        self.built.lock().unwrap().push(Arc::clone(&source));
        source
    }
}
