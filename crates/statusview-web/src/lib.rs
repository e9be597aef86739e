//! statusview server library entry.
//!
//! Wires config, the HTTP status source, the shared feed hub, the mounted
//! status page, and the axum transports into one server. Consumed by the
//! binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod feed;
pub mod obs;
pub mod ops;
pub mod router;
pub mod source;
pub mod transport;
pub mod view;
