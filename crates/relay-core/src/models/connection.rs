use chrono::{DateTime, Utc};

/// One live subscriber session as recorded in the registry.
///
/// A row exists if and only if the transport-layer session is, to the best
/// of the system's knowledge, still open. Immutable once created; a
/// re-registration replaces `registered_at` wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub connection_id: String,
    pub registered_at: DateTime<Utc>,
}
