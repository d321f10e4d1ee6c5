use relay_core::MeasurementValue;

use std::collections::BTreeMap;

use serde::Deserialize;

/// POST /api/v1/readings request body.
///
/// Measurements arrive flattened beside the identity fields, e.g.
/// `{"device_id": "arduino_remote", "temperature": 23.5, "humidity": 60}`.
/// Omitted measurements stay omitted; the store never invents zeros.
#[derive(Debug, Deserialize)]
pub struct CreateReadingRequest {
    pub device_id: String,
    /// Epoch milliseconds; defaults to the server clock when omitted.
    pub timestamp: Option<i64>,
    #[serde(flatten)]
    pub measurements: BTreeMap<String, MeasurementValue>,
}
