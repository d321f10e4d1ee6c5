//! Fan-out against the real SQLite-backed connection registry.

mod common;

use common::create_test_pool;

use relay_core::{ChangeEvent, MeasurementValue};
use relay_db::ConnectionRepository;
use relay_ws::{
    DeliveryChannel, DeliveryOutcome, FanOutDispatcher, Metrics, WsDeliveryChannel,
};

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

/// Marks a fixed set of connection ids as gone; everything else succeeds.
struct PartiallyGoneChannel {
    gone: BTreeSet<String>,
}

impl PartiallyGoneChannel {
    fn new(gone: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            gone: gone.iter().map(|id| id.to_string()).collect(),
        })
    }
}

#[async_trait]
impl DeliveryChannel for PartiallyGoneChannel {
    async fn send(&self, connection_id: &str, _payload: &Bytes) -> DeliveryOutcome {
        if self.gone.contains(connection_id) {
            DeliveryOutcome::Gone
        } else {
            DeliveryOutcome::Success
        }
    }
}

fn reading_event() -> ChangeEvent {
    let mut fields = BTreeMap::new();
    fields.insert("temperature".to_string(), MeasurementValue::Float(23.5));
    ChangeEvent::insert("arduino_remote", 1000, fields)
}

#[tokio::test]
async fn given_stale_connection_when_dispatching_then_it_is_pruned_from_the_store() {
    // Given: two registered connections, one of which is gone
    let pool = create_test_pool().await;
    let registry = ConnectionRepository::new(pool);
    registry.register("alive").await.unwrap();
    registry.register("stale").await.unwrap();

    let dispatcher = FanOutDispatcher::new(
        Arc::new(registry.clone()),
        PartiallyGoneChannel::new(&["stale"]),
        Metrics::new(),
    );

    // When
    let summary = dispatcher.dispatch(&reading_event()).await.unwrap();

    // Then: the stale registration was lazily collected, the live one kept
    assert_eq!(summary.attempted, 2);
    assert_eq!(summary.delivered, 1);
    assert_eq!(summary.pruned, 1);
    assert_eq!(registry.list_live().await.unwrap(), vec!["alive"]);
}

#[tokio::test]
async fn given_healthy_connections_when_dispatching_then_registry_is_untouched() {
    // Given: three healthy connections
    let pool = create_test_pool().await;
    let registry = ConnectionRepository::new(pool);
    for id in ["a", "b", "c"] {
        registry.register(id).await.unwrap();
    }

    let dispatcher = FanOutDispatcher::new(
        Arc::new(registry.clone()),
        PartiallyGoneChannel::new(&[]),
        Metrics::new(),
    );

    // When
    let summary = dispatcher.dispatch(&reading_event()).await.unwrap();

    // Then
    assert_eq!(summary.delivered, 3);
    assert_eq!(summary.pruned, 0);
    assert_eq!(registry.list_live().await.unwrap().len(), 3);
}

#[tokio::test]
async fn given_registry_row_without_session_when_dispatching_then_row_is_pruned() {
    // Given: a registration that survived a restart, with no session behind it
    let pool = create_test_pool().await;
    let registry = ConnectionRepository::new(pool);
    registry.register("ghost").await.unwrap();

    let delivery = WsDeliveryChannel::new(Duration::from_millis(50));
    let dispatcher = FanOutDispatcher::new(
        Arc::new(registry.clone()),
        Arc::new(delivery),
        Metrics::new(),
    );

    // When
    let summary = dispatcher.dispatch(&reading_event()).await.unwrap();

    // Then: the orphaned row is collected on first use
    assert_eq!(summary.pruned, 1);
    assert!(registry.list_live().await.unwrap().is_empty());
}
