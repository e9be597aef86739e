use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::app_state::AppState;

pub async fn status_html(State(app): State<AppState>) -> Response {
    match app.render_page() {
        Some(view) => Html(view.to_html(app.cfg().poll.refresh_secs())).into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "draining").into_response(),
    }
}

pub async fn status_json(State(app): State<AppState>) -> Response {
    match app.render_page() {
        Some(view) => Json(view).into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "draining").into_response(),
    }
}
