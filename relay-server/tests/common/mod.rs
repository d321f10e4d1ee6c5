#![allow(dead_code)]

use relay_db::{ConnectionRepository, ReadingRepository};
use relay_server::build_router;
use relay_ws::{
    AppState, ConnectionConfig, FanOutDispatcher, Metrics, ShutdownCoordinator, WsDeliveryChannel,
};

use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Test server with access to AppState for assertions
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

/// Create a TestServer over an in-memory database
pub async fn create_test_app() -> TestApp {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    sqlx::migrate!("../crates/relay-db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let registry = ConnectionRepository::new(pool.clone());
    let readings = ReadingRepository::new(pool.clone());
    let delivery = WsDeliveryChannel::new(Duration::from_millis(100));
    let metrics = Metrics::new();

    let dispatcher = Arc::new(FanOutDispatcher::new(
        Arc::new(registry.clone()),
        Arc::new(delivery.clone()),
        metrics.clone(),
    ));

    let state = AppState {
        pool,
        registry,
        readings,
        delivery,
        dispatcher,
        metrics,
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig::default(),
    };

    let server = TestServer::builder()
        .http_transport()
        .build(build_router(state.clone()))
        .expect("Failed to create test server");

    TestApp { server, state }
}

/// Wait until the registry snapshot satisfies the predicate, or panic.
pub async fn wait_for_registry<F>(registry: &ConnectionRepository, predicate: F)
where
    F: Fn(&[String]) -> bool,
{
    for _ in 0..100 {
        let live = registry.list_live().await.expect("list_live failed");
        if predicate(&live) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("registry never reached the expected state");
}
