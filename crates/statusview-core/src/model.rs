//! View state machine fed by poll outcomes.
//!
//! `Loading` holds until the first successful response, then `Loaded` holds
//! forever: failed polls are recorded in `last_error` but never blank or
//! revert what is displayed.

use std::sync::Arc;

use serde::Serialize;

use crate::error::{ErrorKind, Result, StatusError};
use crate::snapshot::StatusSnapshot;

/// Display lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    /// No successful response yet.
    #[default]
    Loading,
    /// Latest successful snapshot.
    Loaded(Arc<StatusSnapshot>),
}

/// Classified poll failure kept alongside the last good snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&StatusError> for FetchFailure {
    fn from(e: &StatusError) -> Self {
        Self {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

/// Everything a widget needs to render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusModel {
    state: ViewState,
    last_error: Option<FetchFailure>,
    successes: u64,
    failures: u64,
}

impl StatusModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one poll outcome into the model.
    pub fn apply(&mut self, outcome: Result<StatusSnapshot>) {
        match outcome {
            Ok(snapshot) => {
                self.state = ViewState::Loaded(Arc::new(snapshot));
                self.last_error = None;
                self.successes += 1;
            }
            Err(e) => {
                self.last_error = Some(FetchFailure::from(&e));
                self.failures += 1;
            }
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Latest snapshot, if any poll has succeeded.
    pub fn snapshot(&self) -> Option<&StatusSnapshot> {
        match &self.state {
            ViewState::Loading => None,
            ViewState::Loaded(s) => Some(s),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading)
    }

    /// Loaded, but the most recent poll failed.
    pub fn is_stale(&self) -> bool {
        !self.is_loading() && self.last_error.is_some()
    }

    pub fn last_error(&self) -> Option<&FetchFailure> {
        self.last_error.as_ref()
    }

    pub fn successes(&self) -> u64 {
        self.successes
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }
}
