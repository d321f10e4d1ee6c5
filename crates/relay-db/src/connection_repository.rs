use crate::{DbError, Result as DbErrorResult};

use relay_core::Connection;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// Durable registry of live subscriber connections.
///
/// Every operation goes to storage; there is no in-process cache, so
/// independently running dispatches and lifecycle notifications always see
/// the same registry. Only atomic single-key writes are used; the live set
/// is never read, modified locally, and written back.
pub struct ConnectionRepository {
    pool: SqlitePool,
}

impl ConnectionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a connection as live. Idempotent: re-registering an id
    /// refreshes `registered_at` (last-write-wins).
    pub async fn register(&self, connection_id: &str) -> DbErrorResult<()> {
        let registered_at = Utc::now().timestamp_millis();

        sqlx::query(
            r#"
                INSERT INTO ws_connections (connection_id, registered_at)
                VALUES (?, ?)
                ON CONFLICT(connection_id) DO UPDATE SET registered_at = excluded.registered_at
            "#,
        )
        .bind(connection_id)
        .bind(registered_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove a connection. Removing an id that is already absent is a
    /// successful no-op: disconnect notifications and failed-delivery
    /// pruning can race on the same id.
    pub async fn deregister(&self, connection_id: &str) -> DbErrorResult<()> {
        sqlx::query("DELETE FROM ws_connections WHERE connection_id = ?")
            .bind(connection_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Full unordered snapshot of live connection ids. Connections that
    /// register or deregister after the snapshot are not reflected in it;
    /// callers must tolerate sends to ids that have since vanished.
    pub async fn list_live(&self) -> DbErrorResult<Vec<String>> {
        let ids: Vec<String> = sqlx::query_scalar("SELECT connection_id FROM ws_connections")
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    pub async fn find(&self, connection_id: &str) -> DbErrorResult<Option<Connection>> {
        let row: Option<(String, i64)> = sqlx::query_as(
            "SELECT connection_id, registered_at FROM ws_connections WHERE connection_id = ?",
        )
        .bind(connection_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|(connection_id, registered_at)| {
            let registered_at = DateTime::<Utc>::from_timestamp_millis(registered_at)
                .ok_or_else(|| {
                    DbError::decode(format!(
                        "invalid registered_at for connection {connection_id}: {registered_at}"
                    ))
                })?;

            Ok(Connection {
                connection_id,
                registered_at,
            })
        })
        .transpose()
    }
}

impl Clone for ConnectionRepository {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
        }
    }
}
