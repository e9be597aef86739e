//! statusview core: status snapshot model, view state machine, and rendering.
//!
//! This crate defines the data contract of the status endpoint, the error
//! taxonomy shared by every statusview crate, and the pure functions that turn
//! a snapshot into display text. It carries no transport or runtime
//! dependencies so the same rendering can be driven by a server, a test, or a
//! terminal.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Malformed bodies
//! and unparseable timestamps surface as `StatusError` or fall back to the raw
//! text instead of crashing the view.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod display;
pub mod error;
pub mod model;
pub mod render;
pub mod snapshot;

/// Shared result type.
pub use error::{Result, StatusError};
pub use model::{FetchFailure, StatusModel, ViewState};
pub use snapshot::StatusSnapshot;
