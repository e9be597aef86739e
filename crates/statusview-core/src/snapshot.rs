//! Status document returned by `GET /api/v1/status`.
//!
//! The snapshot is received whole and never mutated locally; a newer poll
//! replaces it wholesale. Unknown fields are ignored so the backend can add
//! keys (it already sends `status`) without breaking the view.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StatusError};

/// Naive layouts emitted by backends that stringify a local datetime.
const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// One status payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatusSnapshot {
    /// Server-reported time of status computation.
    pub updated_at: String,
    /// Reported database version string.
    pub db_version: String,
    /// Configured connection ceiling.
    pub max_connections: i64,
    /// Currently open connections.
    pub active_connections: i64,
}

impl StatusSnapshot {
    /// Decode a response body.
    pub fn decode(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| StatusError::Decode(e.to_string()))
    }

    /// Resolve `updated_at` to an instant shown at `offset`.
    ///
    /// Offset-carrying timestamps are converted; naive ones are taken as wall
    /// clock time at `offset`. Returns `None` when the text matches neither.
    pub fn updated_at_in(&self, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
        let raw = self.updated_at.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&offset));
        }
        NAIVE_LAYOUTS
            .iter()
            .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
            .and_then(|naive| naive.and_local_timezone(offset).single())
    }
}
