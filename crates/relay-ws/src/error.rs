use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsError {
    #[error("Malformed change event: {source} {location}")]
    MalformedEvent {
        #[source]
        source: relay_core::CoreError,
        location: ErrorLocation,
    },

    #[error("Registry unavailable: {source} {location}")]
    RegistryUnavailable {
        #[source]
        source: relay_db::DbError,
        location: ErrorLocation,
    },

    #[error("Payload encode failed: {source} {location}")]
    PayloadEncode {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Connection closed: {reason} {location}")]
    ConnectionClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Send buffer full, client too slow {location}")]
    SendBufferFull { location: ErrorLocation },

    #[error("Heartbeat timeout after {timeout_secs}s {location}")]
    HeartbeatTimeout {
        timeout_secs: u64,
        location: ErrorLocation,
    },

    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl WsError {
    /// Translation failure: the event cannot identify its reading and is
    /// dropped without any delivery attempt.
    #[track_caller]
    pub fn malformed_event(source: relay_core::CoreError) -> Self {
        Self::MalformedEvent {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Listing or mutating the registry failed for infrastructure reasons.
    #[track_caller]
    pub fn registry_unavailable(source: relay_db::DbError) -> Self {
        Self::RegistryUnavailable {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for WsError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::PayloadEncode {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, WsError>;
