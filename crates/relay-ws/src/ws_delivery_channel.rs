use crate::{DeliveryChannel, DeliveryOutcome};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::ws::Message;
use bytes::Bytes;
use tokio::sync::{RwLock, mpsc};

/// Delivery channel backed by this process's open WebSocket sessions.
///
/// Maps connection id to the bounded sender feeding that socket's writer.
/// The map is transport-session state, not registry state: a connection id
/// that is in the durable registry but not here (for example a row that
/// survived a restart) is exactly what `Gone` means.
pub struct WsDeliveryChannel {
    inner: Arc<RwLock<HashMap<String, mpsc::Sender<Message>>>>,
    send_timeout: Duration,
}

impl WsDeliveryChannel {
    pub fn new(send_timeout: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            send_timeout,
        }
    }

    /// Attach a session's outbound sender under its connection id.
    pub async fn attach(&self, connection_id: &str, sender: mpsc::Sender<Message>) {
        let mut inner = self.inner.write().await;
        inner.insert(connection_id.to_string(), sender);
    }

    /// Detach a session; subsequent sends to the id resolve as `Gone`.
    pub async fn detach(&self, connection_id: &str) {
        let mut inner = self.inner.write().await;
        inner.remove(connection_id);
    }

    /// Number of sessions currently attached.
    pub async fn session_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.len()
    }
}

#[async_trait]
impl DeliveryChannel for WsDeliveryChannel {
    async fn send(&self, connection_id: &str, payload: &Bytes) -> DeliveryOutcome {
        let sender = {
            let inner = self.inner.read().await;
            inner.get(connection_id).cloned()
        };

        // No session for the id: the registration is stale.
        let Some(sender) = sender else {
            return DeliveryOutcome::Gone;
        };

        let message = Message::Binary(payload.clone());

        match tokio::time::timeout(self.send_timeout, sender.send(message)).await {
            Ok(Ok(())) => DeliveryOutcome::Success,
            // Receiver dropped: the session ended under us.
            Ok(Err(_)) => DeliveryOutcome::Gone,
            // Buffer stayed full past the timeout: slow, not dead.
            Err(_) => DeliveryOutcome::Transient {
                reason: format!(
                    "send buffer full after {}ms",
                    self.send_timeout.as_millis()
                ),
            },
        }
    }
}

impl Clone for WsDeliveryChannel {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            send_timeout: self.send_timeout,
        }
    }
}
