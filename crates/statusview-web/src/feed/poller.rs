use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use statusview_core::StatusModel;

use crate::obs::PollMetrics;
use crate::source::StatusSource;

pub(crate) struct PollTask {
    pub source: Arc<dyn StatusSource>,
    pub tx: watch::Sender<StatusModel>,
    pub interval: Duration,
    pub cancel: CancellationToken,
    pub metrics: Arc<PollMetrics>,
}

/// Tick, fetch, fold, publish; until cancelled.
///
/// The first tick fires immediately. Only one fetch is in flight; a slow
/// fetch delays the next tick instead of stacking requests.
pub(crate) async fn run(task: PollTask) {
    let PollTask { source, tx, interval, cancel, metrics } = task;
    let endpoint = source.endpoint().to_string();

    let mut tick = tokio::time::interval(interval);
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut model = StatusModel::new();
    let mut failing = false;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = tick.tick() => {}
        }

        let started = Instant::now();
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            res = source.fetch() => res,
        };
        if cancel.is_cancelled() {
            break;
        }
        let elapsed = started.elapsed();

        metrics.fetch_duration.observe(&[("endpoint", endpoint.as_str())], elapsed);
        match &outcome {
            Ok(_) => {
                metrics.polls.inc(&[("endpoint", endpoint.as_str()), ("outcome", "ok")]);
                if failing {
                    tracing::info!(%endpoint, "status endpoint recovered");
                }
                tracing::debug!(%endpoint, elapsed_ms = elapsed.as_millis() as u64, "poll ok");
                failing = false;
            }
            Err(e) => {
                let kind = e.kind().label();
                metrics.polls.inc(&[("endpoint", endpoint.as_str()), ("outcome", kind)]);
                if failing {
                    tracing::debug!(%endpoint, kind, error = %e, "poll still failing");
                } else {
                    tracing::warn!(%endpoint, kind, error = %e, "poll failed, keeping last status");
                }
                failing = true;
            }
        }

        model.apply(outcome);
        tx.send_replace(model.clone());
    }

    tracing::debug!(%endpoint, "poll loop exited");
}
