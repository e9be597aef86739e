//! Config loader (strict parsing + environment override).

pub mod schema;

use std::fs;

use statusview_core::error::{Result, StatusError};

pub use schema::{ApiSection, DisplaySection, PollSection, ServerSection, StatusViewConfig};

/// Overrides `api.host`, the way the deployment injects the API location.
pub const ENV_API_HOST: &str = "STATUSVIEW_API_HOST";
/// Alternate config file path.
pub const ENV_CONFIG_PATH: &str = "STATUSVIEW_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "statusview.yaml";

pub fn load_from_file(path: &str) -> Result<StatusViewConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| StatusError::Config(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<StatusViewConfig> {
    let cfg: StatusViewConfig = serde_yaml::from_str(s)
        .map_err(|e| StatusError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Apply environment overrides, then re-validate.
pub fn apply_env<F>(mut cfg: StatusViewConfig, lookup: F) -> Result<StatusViewConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup(ENV_API_HOST).filter(|h| !h.trim().is_empty()) {
        tracing::info!(host = %host, "api.host overridden from {}", ENV_API_HOST);
        cfg.api.host = host;
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Resolve the config path and load it with process environment overrides.
pub fn load_from_env() -> Result<StatusViewConfig> {
    let path = std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = load_from_file(&path)?;
    apply_env(cfg, |k| std::env::var(k).ok())
}
