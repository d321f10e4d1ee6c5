use crate::{
    ConnectionConfig, ConnectionId, FanOutDispatcher, Metrics, ShutdownCoordinator,
    WebSocketConnection, WsDeliveryChannel,
};

use relay_db::{ConnectionRepository, ReadingRepository};

use std::sync::Arc;

use axum::{
    extract::{State, ws::WebSocketUpgrade},
    http::StatusCode,
    response::Response,
};
use log::{error, info, warn};
use sqlx::SqlitePool;
use tokio::sync::mpsc;

/// Shared application state for WebSocket and ingest handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub registry: ConnectionRepository,
    pub readings: ReadingRepository,
    pub delivery: WsDeliveryChannel,
    pub dispatcher: Arc<FanOutDispatcher>,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
}

/// WebSocket upgrade handler
pub async fn handler(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> Result<Response, StatusCode> {
    let connection_id = ConnectionId::new();
    let id = connection_id.to_string();

    // Attach the session before registering so a dispatch that sees the
    // registry row can already reach the socket.
    let (sender, receiver) = mpsc::channel(state.config.send_buffer_size);
    state.delivery.attach(&id, sender).await;

    // Durable registration. On failure the connect is refused so the
    // client knows its lifecycle notification did not take effect.
    if let Err(e) = state.registry.register(&id).await {
        error!("Failed to register connection {connection_id}: {e}");
        state.metrics.registry_error("register");
        state.delivery.detach(&id).await;
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    info!("Registered connection {connection_id}");
    state.metrics.connection_established();

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, connection_id, receiver, state)))
}

/// Handle WebSocket connection after upgrade
async fn handle_socket(
    socket: axum::extract::ws::WebSocket,
    connection_id: ConnectionId,
    receiver: mpsc::Receiver<axum::extract::ws::Message>,
    state: AppState,
) {
    let shutdown_guard = state.shutdown.subscribe_guard();

    let connection = WebSocketConnection::new(connection_id, state.config.clone());
    let result = connection.handle(socket, receiver, shutdown_guard).await;

    // Teardown: session map first so no new delivery targets the socket,
    // then the durable registry.
    let id = connection_id.to_string();
    state.delivery.detach(&id).await;
    if let Err(e) = state.registry.deregister(&id).await {
        // Failed-delivery pruning will collect the row on a later event.
        state.metrics.registry_error("deregister");
        error!("Failed to deregister connection {connection_id}: {e}");
    }

    state
        .metrics
        .connection_closed(if result.is_ok() { "normal" } else { "error" });

    if let Err(e) = result {
        warn!("Connection {connection_id} error: {e}");
    }
}
