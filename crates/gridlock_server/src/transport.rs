//! WebSocket transport and HTTP routes.

use crate::gateway::Gateway;
use crate::protocol::{ClientEvent, ServerEvent};
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use futures::{SinkExt, StreamExt};
use std::path::Path;
use tokio::sync::mpsc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, instrument, warn};

/// Builds the application router.
///
/// `/ws` upgrades to a game connection, `/healthz` reports liveness and
/// counters. When `static_dir` is set, every other path is served from it.
pub fn router(gateway: Gateway, static_dir: Option<&Path>) -> Router {
    let app = Router::new()
        .route("/ws", get(ws_handler))
        .route("/healthz", get(health))
        .with_state(gateway);

    let app = match static_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "Serving static assets");
            app.fallback_service(ServeDir::new(dir))
        }
        None => app,
    };

    app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

async fn health(State(gateway): State<Gateway>) -> impl IntoResponse {
    Json(gateway.stats())
}

async fn ws_handler(State(gateway): State<Gateway>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(gateway, socket))
}

/// Runs one client connection until either side closes it.
#[instrument(skip_all)]
async fn handle_socket(gateway: Gateway, socket: WebSocket) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();

    let connection = gateway.connect(tx);

    // Forward queued events to the socket. Ends once the gateway drops the
    // outbox on disconnect or the client stops accepting frames.
    let writer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(e) => {
                    warn!(%connection, error = %e, "Failed to encode event");
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                debug!(%connection, "Socket closed while sending");
                break;
            }
        }
    });

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientEvent>(text.as_str()) {
                Ok(event) => gateway.handle(connection, event),
                Err(e) => debug!(%connection, error = %e, "Ignoring malformed frame"),
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(%connection, error = %e, "Socket error");
                break;
            }
        }
    }

    gateway.disconnect(connection);
    if let Err(e) = writer.await {
        debug!(%connection, error = %e, "Writer task ended abnormally");
    }
}
