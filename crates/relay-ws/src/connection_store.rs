use async_trait::async_trait;
use relay_db::{ConnectionRepository, Result as DbErrorResult};

/// Registry seam used by the dispatcher and the connection lifecycle.
///
/// Implementations must back every call with shared durable state (no
/// in-process caching) and must signal storage failures instead of
/// silently succeeding, so the transport layer can decide whether to retry
/// a lifecycle notification.
#[async_trait]
pub trait ConnectionStore: Send + Sync {
    /// Idempotently record `connection_id` as live with a fresh
    /// registration time.
    async fn register(&self, connection_id: &str) -> DbErrorResult<()>;

    /// Remove `connection_id`; a no-op if already absent.
    async fn deregister(&self, connection_id: &str) -> DbErrorResult<()>;

    /// Unordered snapshot of all live connection ids.
    async fn list_live(&self) -> DbErrorResult<Vec<String>>;
}

#[async_trait]
impl ConnectionStore for ConnectionRepository {
    async fn register(&self, connection_id: &str) -> DbErrorResult<()> {
        ConnectionRepository::register(self, connection_id).await
    }

    async fn deregister(&self, connection_id: &str) -> DbErrorResult<()> {
        ConnectionRepository::deregister(self, connection_id).await
    }

    async fn list_live(&self) -> DbErrorResult<Vec<String>> {
        ConnectionRepository::list_live(self).await
    }
}
