use crate::MeasurementValue;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One durably stored sensor reading, keyed by (device_id, timestamp).
///
/// `timestamp` is epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorReading {
    pub device_id: String,
    pub timestamp: i64,
    pub fields: BTreeMap<String, MeasurementValue>,
}

impl SensorReading {
    pub fn new(
        device_id: impl Into<String>,
        timestamp: i64,
        fields: BTreeMap<String, MeasurementValue>,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            timestamp,
            fields,
        }
    }
}
