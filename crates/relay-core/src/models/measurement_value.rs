use serde::{Deserialize, Serialize};

/// A single measurement as reported by a device.
///
/// Untagged, so the wire form is the bare JSON value. Integer is tried
/// before Float during deserialization so `60` stays `60`, not `60.0`.
/// A numeric measurement must never turn into a string on the wire, and
/// vice versa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasurementValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl MeasurementValue {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }
}

impl From<i64> for MeasurementValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for MeasurementValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for MeasurementValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
