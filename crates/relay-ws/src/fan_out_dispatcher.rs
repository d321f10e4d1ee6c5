use crate::{
    ConnectionStore, DeliveryChannel, DeliveryOutcome, DispatchSummary, Metrics,
    Result as WsErrorResult, WsError,
};

use relay_core::{ChangeEvent, ChangeKind, translate};

use std::sync::Arc;

use bytes::Bytes;
use futures::future;
use log::{debug, info, warn};

/// Fans one change event out to every live connection.
///
/// Invoked once per event by an external trigger; holds no event-scoped
/// state, so any number of dispatches may run concurrently. The registry
/// snapshot is taken fresh for every event; the store is the single
/// source of truth and is never cached here.
pub struct FanOutDispatcher {
    store: Arc<dyn ConnectionStore>,
    channel: Arc<dyn DeliveryChannel>,
    metrics: Metrics,
}

impl FanOutDispatcher {
    pub fn new(
        store: Arc<dyn ConnectionStore>,
        channel: Arc<dyn DeliveryChannel>,
        metrics: Metrics,
    ) -> Self {
        Self {
            store,
            channel,
            metrics,
        }
    }

    /// Broadcast one change event.
    ///
    /// Per-connection failures never abort the batch; a registry listing
    /// failure abandons this event entirely (fail-closed) without touching
    /// the registry. The dispatch completes once every attempt has
    /// resolved; there is no overall timeout, only each delivery's own.
    pub async fn dispatch(&self, event: &ChangeEvent) -> WsErrorResult<DispatchSummary> {
        if event.kind != ChangeKind::Insert {
            debug!(
                "Ignoring {} event for device {:?}",
                event.kind, event.device_id
            );
            self.metrics.event_ignored(event.kind.as_str());
            return Ok(DispatchSummary::ignored());
        }

        self.metrics.event_received();

        let payload = translate(event).map_err(|source| {
            self.metrics.translation_rejected();
            WsError::malformed_event(source)
        })?;

        // Serialize once; every connection receives the same bytes.
        let body = Bytes::from(serde_json::to_vec(&payload)?);

        let live = self.store.list_live().await.map_err(|source| {
            self.metrics.registry_error("list_live");
            WsError::registry_unavailable(source)
        })?;

        if live.is_empty() {
            debug!("No live connections for reading from {}", payload.device_id);
            return Ok(DispatchSummary::default());
        }

        // One independent send per connection; the batch is complete when
        // all have resolved, in no particular order.
        let outcomes = future::join_all(
            live.iter()
                .map(|connection_id| self.deliver(connection_id, &body)),
        )
        .await;

        let mut summary = DispatchSummary::default();
        for outcome in &outcomes {
            summary.record(outcome);
        }

        info!("Broadcast reading from {}: {}", payload.device_id, summary);
        self.metrics.broadcast_completed(summary.attempted);

        Ok(summary)
    }

    /// One unicast attempt, classified and handled. Nothing that happens
    /// here can block or fail another connection's delivery.
    async fn deliver(&self, connection_id: &str, body: &Bytes) -> DeliveryOutcome {
        let outcome = self.channel.send(connection_id, body).await;
        self.metrics.delivery_resolved(outcome.as_str());

        match &outcome {
            DeliveryOutcome::Success => {}
            DeliveryOutcome::Gone => {
                info!("Connection {connection_id} is gone, deregistering");
                if let Err(e) = self.store.deregister(connection_id).await {
                    // Leave the row for the next cycle to collect.
                    self.metrics.registry_error("deregister");
                    warn!("Failed to deregister gone connection {connection_id}: {e}");
                }
            }
            DeliveryOutcome::Transient { reason } => {
                warn!("Transient delivery failure for connection {connection_id}: {reason}");
            }
        }

        outcome
    }
}
