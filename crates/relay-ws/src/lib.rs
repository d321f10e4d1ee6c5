pub mod app_state;
pub mod connection_config;
pub mod connection_id;
pub mod connection_store;
pub mod delivery_channel;
pub mod delivery_outcome;
pub mod dispatch_summary;
pub mod error;
pub mod fan_out_dispatcher;
pub mod metrics;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod web_socket_connection;
pub mod ws_delivery_channel;

pub use app_state::{AppState, handler};
pub use connection_config::ConnectionConfig;
pub use connection_id::ConnectionId;
pub use connection_store::ConnectionStore;
pub use delivery_channel::DeliveryChannel;
pub use delivery_outcome::DeliveryOutcome;
pub use dispatch_summary::DispatchSummary;
pub use error::{Result, WsError};
pub use fan_out_dispatcher::FanOutDispatcher;
pub use metrics::Metrics;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use web_socket_connection::WebSocketConnection;
pub use ws_delivery_channel::WsDeliveryChannel;

#[cfg(test)]
mod tests;

use tracing::info_span;

/// Create a tracing span for one event's fan-out.
/// All log entries within the dispatch will include these fields.
pub fn create_dispatch_span(device_id: &str, kind: &str) -> tracing::Span {
    info_span!(
        "fan_out",
        device_id = %device_id,
        kind = %kind,
    )
}
