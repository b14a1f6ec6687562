//! Axum HTTP/WebSocket surface: `GET /ws` and `GET /healthz`.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use uuid::Uuid;

use crate::hub::LiveHub;
use crate::manager::CLIENT_CHANNEL_CAPACITY;
use crate::protocol::{ClientMessage, MAX_FRAME_BYTES, TOPIC_WARNINGS};

const PING_INTERVAL: StdDuration = StdDuration::from_secs(54);
const READ_DEADLINE: StdDuration = StdDuration::from_secs(60);

pub fn router(hub: Arc<LiveHub>) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/healthz", get(health_handler))
        .with_state(hub)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
}

pub async fn serve(hub: Arc<LiveHub>, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router(hub);
    info!(%addr, "nwws-live listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health_handler(State(hub): State<Arc<LiveHub>>) -> impl IntoResponse {
    let uptime = hub.uptime();
    axum::Json(serde_json::json!({
        "status": "ok",
        "uptime_secs": uptime.num_seconds(),
    }))
}

async fn ws_handler(ws: WebSocketUpgrade, State(hub): State<Arc<LiveHub>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

async fn handle_socket(socket: WebSocket, hub: Arc<LiveHub>) {
    let client_id = Uuid::now_v7();
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::channel(CLIENT_CHANNEL_CAPACITY);

    info!(%client_id, "client connected");

    let write_task = tokio::spawn(async move {
        let mut ping_interval = tokio::time::interval(PING_INTERVAL);
        loop {
            tokio::select! {
                envelope = rx.recv() => {
                    let Some(envelope) = envelope else { break };
                    let Ok(text) = serde_json::to_string(&envelope) else { continue };
                    if sink.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                _ = ping_interval.tick() => {
                    if sink.send(Message::Ping(Vec::new().into())).await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    loop {
        match tokio::time::timeout(READ_DEADLINE, stream.next()).await {
            Ok(Some(Ok(Message::Text(text)))) => {
                if text.len() > MAX_FRAME_BYTES {
                    warn!(%client_id, "oversize frame, closing session");
                    break;
                }
                match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::Subscribe { topics }) if topics.iter().any(|t| t == TOPIC_WARNINGS) => {
                        let init = hub.warnings.subscribe(client_id, tx.clone()).await;
                        let _ = tx.try_send(init);
                    }
                    Ok(ClientMessage::Unsubscribe { topics }) if topics.iter().any(|t| t == TOPIC_WARNINGS) => {
                        hub.warnings.unsubscribe(client_id).await;
                    }
                    Ok(_) => {}
                    Err(err) => warn!(%client_id, error = %err, "malformed client message"),
                }
            }
            Ok(Some(Ok(Message::Close(_)))) | Ok(None) => {
                info!(%client_id, "client closed connection");
                break;
            }
            Ok(Some(Ok(_))) => {}
            Ok(Some(Err(err))) => {
                warn!(%client_id, error = %err, "websocket read error");
                break;
            }
            Err(_) => {
                warn!(%client_id, "read deadline exceeded, closing session");
                break;
            }
        }
    }

    hub.warnings.unsubscribe(client_id).await;
    write_task.abort();
}
