//! Lightweight in-process metrics (dependency-free).
//!
//! Poll outcomes, fetch latency, and subscriber counts are stored as atomics
//! and rendered by the `/metrics` handler.

pub mod metrics;

pub use metrics::PollMetrics;
