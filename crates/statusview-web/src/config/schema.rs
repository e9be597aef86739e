use std::time::Duration;

use serde::Deserialize;
use statusview_core::display::{parse_utc_offset, DisplayOptions, ErrorVisibility, Locale};
use statusview_core::error::{Result, StatusError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusViewConfig {
    pub version: u32,

    pub api: ApiSection,

    #[serde(default)]
    pub poll: PollSection,

    #[serde(default)]
    pub display: DisplaySection,

    #[serde(default)]
    pub server: ServerSection,
}

impl StatusViewConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(StatusError::UnsupportedVersion);
        }

        self.api.validate()?;
        self.poll.validate()?;
        self.display.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// `host[:port]` of the status API, without scheme.
    pub host: String,

    #[serde(default = "default_scheme")]
    pub scheme: String,

    #[serde(default = "default_path")]
    pub path: String,

    /// Per-request timeout; client defaults apply when absent.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl ApiSection {
    pub fn validate(&self) -> Result<()> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(StatusError::Config("api.host must not be empty".into()));
        }
        if host.contains("://") || host.contains('/') {
            return Err(StatusError::Config(
                "api.host must be host[:port] without scheme or path".into(),
            ));
        }
        if !matches!(self.scheme.as_str(), "http" | "https") {
            return Err(StatusError::Config("api.scheme must be http or https".into()));
        }
        if !self.path.starts_with('/') {
            return Err(StatusError::Config("api.path must start with '/'".into()));
        }
        if let Some(ms) = self.timeout_ms {
            if !(100..=60000).contains(&ms) {
                return Err(StatusError::Config(
                    "api.timeout_ms must be between 100 and 60000".into(),
                ));
            }
        }
        Ok(())
    }

    /// Full status endpoint URL, e.g. `http://localhost:8000/api/v1/status`.
    pub fn endpoint_url(&self) -> String {
        format!("{}://{}{}", self.scheme, self.host.trim(), self.path)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollSection {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for PollSection {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

impl PollSection {
    pub fn validate(&self) -> Result<()> {
        if !(250..=3_600_000).contains(&self.interval_ms) {
            return Err(StatusError::Config(
                "poll.interval_ms must be between 250 and 3600000".into(),
            ));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Page reload period, rounded up to whole seconds.
    pub fn refresh_secs(&self) -> u64 {
        self.interval_ms.div_ceil(1000).max(1)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplaySection {
    #[serde(default)]
    pub locale: Locale,

    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,

    #[serde(default)]
    pub error_visibility: ErrorVisibility,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            utc_offset: default_utc_offset(),
            error_visibility: ErrorVisibility::default(),
        }
    }
}

impl DisplaySection {
    pub fn validate(&self) -> Result<()> {
        parse_utc_offset(&self.utc_offset).map(|_| ())
    }

    pub fn options(&self) -> Result<DisplayOptions> {
        Ok(DisplayOptions {
            locale: self.locale,
            offset: parse_utc_offset(&self.utc_offset)?,
            error_visibility: self.error_visibility,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_scheme() -> String {
    "http".into()
}
fn default_path() -> String {
    "/api/v1/status".into()
}
fn default_interval_ms() -> u64 {
    2000
}
fn default_utc_offset() -> String {
    "Z".into()
}
fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
