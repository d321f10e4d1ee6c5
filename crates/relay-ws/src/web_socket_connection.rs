use crate::{ConnectionConfig, ConnectionId, Result as WsErrorResult, ShutdownGuard, WsError};

use std::panic::Location;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use bytes::Bytes;
use error_location::ErrorLocation;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Manages a single WebSocket connection after upgrade.
///
/// Subscribers are listen-only: the loop pumps fan-out deliveries to the
/// socket, answers pings, and enforces the heartbeat. Registration happened
/// before the upgrade; the caller deregisters after this returns.
pub struct WebSocketConnection {
    connection_id: ConnectionId,
    config: ConnectionConfig,
}

impl WebSocketConnection {
    pub fn new(connection_id: ConnectionId, config: ConnectionConfig) -> Self {
        Self {
            connection_id,
            config,
        }
    }

    /// Handle the WebSocket connection lifecycle
    pub async fn handle(
        self,
        socket: WebSocket,
        mut outbound: mpsc::Receiver<Message>,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        log::info!("WebSocket connection {} established", self.connection_id);

        let (mut ws_sender, mut ws_receiver) = socket.split();

        let heartbeat_timeout = Duration::from_secs(self.config.heartbeat_timeout_secs);
        let heartbeat_interval = Duration::from_secs(self.config.heartbeat_interval_secs);
        // First ping one interval in, not at connect time
        let mut heartbeat =
            tokio::time::interval_at(Instant::now() + heartbeat_interval, heartbeat_interval);
        let mut last_seen = Instant::now();

        let result = loop {
            tokio::select! {
                // Deliveries from the fan-out dispatcher
                delivery = outbound.recv() => {
                    match delivery {
                        Some(message) => {
                            if ws_sender.send(message).await.is_err() {
                                break Err(WsError::ConnectionClosed {
                                    reason: "delivery send failed".to_string(),
                                    location: ErrorLocation::from(Location::caller()),
                                });
                            }
                        }
                        // Detached from the delivery channel
                        None => break Ok(()),
                    }
                }

                // Frames from the client
                inbound = ws_receiver.next() => {
                    match inbound {
                        Some(Ok(message)) => {
                            last_seen = Instant::now();
                            match message {
                                Message::Ping(data) => {
                                    if ws_sender.send(Message::Pong(data)).await.is_err() {
                                        break Err(WsError::ConnectionClosed {
                                            reason: "pong send failed".to_string(),
                                            location: ErrorLocation::from(Location::caller()),
                                        });
                                    }
                                }
                                Message::Close(_) => {
                                    log::info!(
                                        "Received close frame from connection {}",
                                        self.connection_id
                                    );
                                    break Ok(());
                                }
                                // Viewers only listen; other frames are ignored
                                _ => {}
                            }
                        }
                        Some(Err(e)) => {
                            break Err(WsError::ConnectionClosed {
                                reason: format!("WebSocket error: {e}"),
                                location: ErrorLocation::from(Location::caller()),
                            });
                        }
                        None => {
                            log::info!("Connection {} closed by client", self.connection_id);
                            break Ok(());
                        }
                    }
                }

                _ = heartbeat.tick() => {
                    if last_seen.elapsed() > heartbeat_timeout {
                        break Err(WsError::HeartbeatTimeout {
                            timeout_secs: self.config.heartbeat_timeout_secs,
                            location: ErrorLocation::from(Location::caller()),
                        });
                    }
                    if ws_sender.send(Message::Ping(Bytes::new())).await.is_err() {
                        break Err(WsError::ConnectionClosed {
                            reason: "heartbeat ping send failed".to_string(),
                            location: ErrorLocation::from(Location::caller()),
                        });
                    }
                }

                // Graceful shutdown
                _ = shutdown_guard.wait() => {
                    log::info!("Shutting down connection {} gracefully", self.connection_id);
                    break Ok(());
                }
            }
        };

        log::info!("WebSocket connection {} closed", self.connection_id);

        result
    }
}
