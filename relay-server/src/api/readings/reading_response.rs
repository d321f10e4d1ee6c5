use serde::Serialize;

/// POST /api/v1/readings response body.
#[derive(Debug, Serialize)]
pub struct ReadingResponse {
    pub device_id: String,
    pub timestamp: i64,
    /// "insert" for a new reading, "modify" for an overwrite.
    pub change: String,
}
