//! Sensor ingest handler.
//!
//! This is where the change-event path starts: every durable reading write
//! produces one event, which is handed to the fan-out dispatcher so all
//! connected dashboard viewers see the reading in near real time.

use crate::{ApiError, ApiResult, CreateReadingRequest, ReadingResponse};

use relay_core::{ChangeEvent, SensorReading};
use relay_ws::AppState;

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use log::error;
use tracing::Instrument;

/// POST /api/v1/readings
///
/// Durably store one reading, then push it to every live connection. The
/// push runs detached: ingest latency never depends on fan-out, and a
/// fan-out failure never fails the write.
pub async fn create_reading(
    State(state): State<AppState>,
    Json(request): Json<CreateReadingRequest>,
) -> ApiResult<(StatusCode, Json<ReadingResponse>)> {
    if request.device_id.trim().is_empty() {
        return Err(ApiError::validation(
            "device_id must not be empty",
            Some("device_id"),
        ));
    }

    let timestamp = request
        .timestamp
        .unwrap_or_else(|| Utc::now().timestamp_millis());

    let reading = SensorReading::new(request.device_id, timestamp, request.measurements);

    let kind = state.readings.record(&reading).await?;

    let event = ChangeEvent::for_reading(kind, &reading);
    let dispatcher = state.dispatcher.clone();
    let span = relay_ws::create_dispatch_span(&reading.device_id, kind.as_str());
    tokio::spawn(
        async move {
            if let Err(e) = dispatcher.dispatch(&event).await {
                error!(
                    "Broadcast failed for reading from {}: {}",
                    event.device_id.as_deref().unwrap_or("<unknown>"),
                    e
                );
            }
        }
        .instrument(span),
    );

    Ok((
        StatusCode::CREATED,
        Json(ReadingResponse {
            device_id: reading.device_id,
            timestamp,
            change: kind.as_str().to_string(),
        }),
    ))
}
