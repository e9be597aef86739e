//! statusview server
//!
//! - Polls `<scheme>://<api.host>/api/v1/status` on a fixed interval
//! - Serves the rendered page: /status (HTML), /status.json, /v1/status/ws
//! - Ops: /healthz, /readyz, /metrics
//! - Ctrl-C drains: unmount page, cancel polling, stop serving

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use statusview_core::error::{Result, StatusError};
use statusview_web::{app_state::AppState, config, router, source::HttpSourceFactory};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "statusview failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg = config::load_from_env()?;
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .map_err(|e| StatusError::Config(format!("server.listen must be a valid SocketAddr: {e}")))?;

    let factory = HttpSourceFactory::new(cfg.api.timeout())?;
    let state = AppState::new(cfg, Arc::new(factory))?;
    let app = router::build_router(state.clone());

    tracing::info!(%listen, endpoint = %state.endpoint(), "statusview starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| StatusError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(drain_on_ctrl_c(state))
        .await
        .map_err(|e| StatusError::Internal(format!("server failed: {e}")))?;

    tracing::info!("statusview stopped");
    Ok(())
}

async fn drain_on_ctrl_c(state: AppState) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    tracing::info!("draining");
    state.begin_drain();
}
