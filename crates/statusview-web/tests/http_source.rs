//! HttpStatusSource against a local axum endpoint.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};

use statusview_core::error::ErrorKind;
use statusview_web::source::{HttpSourceFactory, SourceFactory, StatusSource};

const OK_BODY: &str = r#"{"status":"ok","updated_at":"2024-01-01T12:00:00Z","db_version":"14.2","max_connections":100,"active_connections":7}"#;

async fn serve() -> SocketAddr {
    let app = Router::new()
        .route("/api/v1/status", get(|| async { ([("content-type", "application/json")], OK_BODY) }))
        .route("/broken", get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "db down") }))
        .route("/garbage", get(|| async { "<html>oops</html>" }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                OK_BODY
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn fetches_and_decodes() {
    let addr = serve().await;
    let factory = HttpSourceFactory::new(None).unwrap();
    let source = factory.source_for(&format!("http://{addr}/api/v1/status"));

    let snap = source.fetch().await.unwrap();
    assert_eq!(snap.db_version, "14.2");
    assert_eq!(snap.max_connections, 100);
    assert_eq!(snap.active_connections, 7);
    assert_eq!(source.endpoint(), format!("http://{addr}/api/v1/status"));
}

#[tokio::test]
async fn classifies_failures() {
    let addr = serve().await;
    let factory = HttpSourceFactory::new(Some(Duration::from_millis(300))).unwrap();

    let err = factory.source_for(&format!("http://{addr}/broken")).fetch().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HttpStatus);
    assert_eq!(err.to_string(), "unexpected http status: 503");

    let err = factory.source_for(&format!("http://{addr}/garbage")).fetch().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);

    let err = factory.source_for(&format!("http://{addr}/slow")).fetch().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let factory = HttpSourceFactory::new(Some(Duration::from_secs(2))).unwrap();
    let err = factory
        .source_for(&format!("http://{addr}/api/v1/status"))
        .fetch()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
}
