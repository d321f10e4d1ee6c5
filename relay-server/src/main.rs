use relay_server::{build_router, logger};

use relay_db::{ConnectionRepository, ReadingRepository};
use relay_ws::{
    AppState, ConnectionConfig, FanOutDispatcher, Metrics, ShutdownCoordinator, WsDeliveryChannel,
};

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use log::{error, info};
use metrics_exporter_prometheus::PrometheusBuilder;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    // Load and validate configuration
    let config = relay_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = relay_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting relay-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(database_path)
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .busy_timeout(std::time::Duration::from_secs(5)),
        )
        .await?;

    info!("Database connection established");

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("../crates/relay-db/migrations")
        .run(&pool)
        .await?;
    info!("Migrations complete");

    // Prometheus recorder; rendered by the /metrics route
    let prometheus = PrometheusBuilder::new().install_recorder()?;

    // Durable connection registry and reading store
    let registry = ConnectionRepository::new(pool.clone());
    let readings = ReadingRepository::new(pool.clone());

    // Delivery channel over this process's open sockets
    let delivery = WsDeliveryChannel::new(Duration::from_millis(config.websocket.send_timeout_ms));

    // Metrics collector
    let metrics = Metrics::new();

    // Fan-out dispatcher: registry snapshot per event, concurrent sends
    let dispatcher = Arc::new(FanOutDispatcher::new(
        Arc::new(registry.clone()),
        Arc::new(delivery.clone()),
        metrics.clone(),
    ));

    // Create shutdown coordinator
    let shutdown = ShutdownCoordinator::new();

    // Create connection config for relay-ws
    let connection_config = ConnectionConfig {
        send_buffer_size: config.websocket.send_buffer_size,
        heartbeat_interval_secs: config.websocket.heartbeat_interval_secs,
        heartbeat_timeout_secs: config.websocket.heartbeat_timeout_secs,
    };

    // Build application state
    let app_state = AppState {
        pool,
        registry,
        readings,
        delivery,
        dispatcher,
        metrics,
        shutdown: shutdown.clone(),
        config: connection_config,
    };

    // Build router
    let app = build_router(app_state)
        .route("/metrics", get(move || async move { prometheus.render() }));

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    // Start server with graceful shutdown
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let mut guard = shutdown.subscribe_guard();
            guard.wait().await;
            info!("Graceful shutdown complete");
        })
        .await?;

    Ok(())
}
