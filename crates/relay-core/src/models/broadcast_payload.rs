use crate::MeasurementValue;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The wire-level projection of a change event.
///
/// Serializes flat: `{"deviceId": ..., "timestamp": ..., <measurements>}`.
/// Measurements that were not reported are absent from the object, never
/// defaulted, so subscribers can distinguish "not reported" from zero.
/// Stateless: recomputed per event, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastPayload {
    #[serde(rename = "deviceId")]
    pub device_id: String,
    pub timestamp: i64,
    #[serde(flatten)]
    pub fields: BTreeMap<String, MeasurementValue>,
}
