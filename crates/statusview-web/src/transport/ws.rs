//! WebSocket status stream.
//!
//! Each connection mounts its own `StatusPage` for the lifetime of the
//! socket, sends the current view right away, then one message per changed
//! view. Closing the socket unmounts the page.

use axum::{
    extract::{ws::Message, ws::WebSocket, ws::WebSocketUpgrade, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{Sink, SinkExt, StreamExt};

use statusview_core::error::{Result, StatusError};
use statusview_core::render::PageView;

use crate::app_state::AppState;
use crate::view::StatusPage;

pub async fn ws_upgrade(State(app): State<AppState>, ws: WebSocketUpgrade) -> Response {
    if app.is_draining() {
        return (StatusCode::SERVICE_UNAVAILABLE, "draining").into_response();
    }
    ws.on_upgrade(move |socket| async move {
        if let Err(e) = run_session(app, socket).await {
            tracing::debug!(error = %e, "status ws session ended");
        }
    })
}

async fn run_session(app: AppState, socket: WebSocket) -> Result<()> {
    let mut page = app.mount_page();
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut last_sent: Option<PageView> = None;

    send_if_changed(&mut ws_tx, &page, &mut last_sent).await?;

    loop {
        tokio::select! {
            changed = page.changed() => {
                if changed.is_err() {
                    // feed shut down (draining)
                    let _ = ws_tx.send(Message::Close(None)).await;
                    break;
                }
                send_if_changed(&mut ws_tx, &page, &mut last_sent).await?;
            }

            incoming = ws_rx.next() => {
                let Some(Ok(msg)) = incoming else { break; };
                match msg {
                    Message::Close(_) => break,
                    Message::Ping(payload) => {
                        let _ = ws_tx.send(Message::Pong(payload)).await;
                    }
                    _ => {}
                }
            }
        }
    }

    page.unmount();
    Ok(())
}

async fn send_if_changed<S>(tx: &mut S, page: &StatusPage, last_sent: &mut Option<PageView>) -> Result<()>
where
    S: Sink<Message> + Unpin,
{
    let view = page.render();
    if last_sent.as_ref() == Some(&view) {
        return Ok(());
    }

    let text = serde_json::to_string(&view)
        .map_err(|e| StatusError::Internal(format!("json encode failed: {e}")))?;
    tx.send(Message::Text(text))
        .await
        .map_err(|_| StatusError::Internal("ws send failed".into()))?;

    *last_sent = Some(view);
    Ok(())
}
