use crate::DeliveryOutcome;

use async_trait::async_trait;
use bytes::Bytes;

/// Push transport keyed by connection id.
///
/// One call is one unicast attempt and must resolve to exactly one
/// outcome. Implementations own their per-attempt timeout; the dispatcher
/// imposes none of its own.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    async fn send(&self, connection_id: &str, payload: &Bytes) -> DeliveryOutcome;
}
