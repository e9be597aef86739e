//! Router over a scripted feed: page, JSON view, ops, drain.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod support;

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use statusview_web::{app_state::AppState, config, router};

use support::{snapshot, ScriptedFactory};

const EP: &str = "http://api.test:8000/api/v1/status";

fn cfg(extra: &str) -> config::StatusViewConfig {
    config::load_from_str(&format!("version: 1\napi:\n  host: \"api.test:8000\"\n{extra}")).unwrap()
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let resp = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test(start_paused = true)]
async fn serves_rendered_page() {
    let factory = ScriptedFactory::new();
    factory.script(EP, vec![Ok(snapshot(7))]);
    let state = AppState::new(cfg(""), factory.clone()).unwrap();
    let app = router::build_router(state.clone());

    tokio::time::sleep(Duration::from_millis(100)).await;

    let (status, body) = get(&app, "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<meta http-equiv=\"refresh\" content=\"2\">"));
    assert!(body.contains("<div>Última atualização: 01/01/2024, 12:00:00</div>"));
    assert!(body.contains("<li>Database Version: 14.2</li>"));
    assert!(body.contains("<li>Max Connections: 100</li>"));
    assert!(body.contains("<li>Opened Connections: 7</li>"));

    let (status, body) = get(&app, "/status.json").await;
    assert_eq!(status, StatusCode::OK);
    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["lang"], "pt-BR");
    assert_eq!(v["updated_at"]["text"], "01/01/2024, 12:00:00");
    assert_eq!(v["database"]["rows"][2]["label"], "Opened Connections");
    assert_eq!(v["database"]["rows"][2]["value"], "7");
    assert!(v["updated_at"].get("notice").is_none());

    // one feed, one fetch, however many requests
    assert_eq!(factory.total_calls(EP), 1);
}

#[tokio::test(start_paused = true)]
async fn indicator_policy_surfaces_failure() {
    let factory = ScriptedFactory::new();
    factory.script(EP, vec![Ok(snapshot(7)), Err(support::network_down())]);
    let state = AppState::new(cfg("display:\n  error_visibility: indicator\n"), factory.clone()).unwrap();
    let app = router::build_router(state);

    tokio::time::sleep(Duration::from_millis(2100)).await;

    let (_, body) = get(&app, "/status").await;
    assert!(body.contains("<li>Opened Connections: 7</li>"));
    assert!(body.contains("<div class=\"notice\">Dados desatualizados (network)</div>"));
}

#[tokio::test(start_paused = true)]
async fn ops_endpoints_and_drain() {
    let factory = ScriptedFactory::new();
    factory.script(EP, vec![Ok(snapshot(7))]);
    let state = AppState::new(cfg(""), factory.clone()).unwrap();
    let app = router::build_router(state.clone());
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(get(&app, "/healthz").await, (StatusCode::OK, "ok".to_string()));
    assert_eq!(get(&app, "/readyz").await, (StatusCode::OK, "ready".to_string()));

    let (status, body) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&format!("statusview_polls_total{{endpoint=\"{EP}\",outcome=\"ok\"}} 1")));
    assert!(body.contains("statusview_feeds_active 1"));
    assert!(body.contains("statusview_subscribers_total 2"));

    state.begin_drain();
    assert_eq!(state.hub().active_feeds(), 0);
    assert_eq!(get(&app, "/readyz").await.0, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(get(&app, "/status").await.0, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(get(&app, "/status.json").await.0, StatusCode::SERVICE_UNAVAILABLE);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(factory.total_calls(EP), 1);
}

#[tokio::test(start_paused = true)]
async fn drain_is_final() {
    let factory = ScriptedFactory::new();
    factory.script(EP, vec![Ok(snapshot(7))]);
    let state = AppState::new(cfg(""), factory.clone()).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(factory.total_calls(EP), 1);

    state.begin_drain();

    // a consumer arriving during graceful shutdown
    let mut page = state.mount_page();
    assert_eq!(state.hub().active_feeds(), 0);
    assert!(page.changed().await.is_err());

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(factory.total_calls(EP), 1);
    assert_eq!(factory.sources(EP).len(), 1);
}
