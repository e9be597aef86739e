//! Status sources: where snapshots come from.
//!
//! The feed hub only sees these traits, so the HTTP client can be swapped for
//! scripted sources in tests.

pub mod http;

use std::sync::Arc;

use async_trait::async_trait;

use statusview_core::error::Result;
use statusview_core::StatusSnapshot;

pub use http::{HttpSourceFactory, HttpStatusSource};

/// One pollable status endpoint.
#[async_trait]
pub trait StatusSource: Send + Sync {
    fn endpoint(&self) -> &str;
    /// One GET + decode. Errors are classified (network / status / decode).
    async fn fetch(&self) -> Result<StatusSnapshot>;
}

/// Builds the source backing a feed for a given endpoint URL.
pub trait SourceFactory: Send + Sync {
    fn source_for(&self, endpoint: &str) -> Arc<dyn StatusSource>;
}
