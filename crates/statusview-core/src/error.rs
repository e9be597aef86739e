//! Shared error type across statusview crates.

use serde::Serialize;
use thiserror::Error;

/// Stable error classification (used in logs, metrics labels, and notices).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Endpoint unreachable, connection reset, timeout.
    Network,
    /// Endpoint answered with a non-2xx status.
    HttpStatus,
    /// Body is not a valid status document.
    Decode,
    /// Invalid configuration.
    Config,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorKind {
    /// Upper-case code used in JSON views.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Network => "NETWORK",
            ErrorKind::HttpStatus => "HTTP_STATUS",
            ErrorKind::Decode => "DECODE",
            ErrorKind::Config => "CONFIG",
            ErrorKind::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorKind::Internal => "INTERNAL",
        }
    }

    /// Lower-case label used for metrics and user-facing notices.
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Network => "network",
            ErrorKind::HttpStatus => "http_status",
            ErrorKind::Decode => "decode",
            ErrorKind::Config => "config",
            ErrorKind::UnsupportedVersion => "unsupported_version",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, StatusError>;

/// Unified error type used by core and web.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatusError {
    #[error("network: {0}")]
    Network(String),
    #[error("unexpected http status: {0}")]
    HttpStatus(u16),
    #[error("decode: {0}")]
    Decode(String),
    #[error("config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl StatusError {
    /// Map an error to its stable kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StatusError::Network(_) => ErrorKind::Network,
            StatusError::HttpStatus(_) => ErrorKind::HttpStatus,
            StatusError::Decode(_) => ErrorKind::Decode,
            StatusError::Config(_) => ErrorKind::Config,
            StatusError::UnsupportedVersion => ErrorKind::UnsupportedVersion,
            StatusError::Internal(_) => ErrorKind::Internal,
        }
    }
}
