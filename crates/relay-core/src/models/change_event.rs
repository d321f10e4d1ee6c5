use crate::{ChangeKind, MeasurementValue, SensorReading};

use std::collections::BTreeMap;

/// One notification that a sensor reading was durably written.
///
/// Identity fields are optional because the event is a raw record from the
/// storage layer; the payload translator is where missing identity is
/// rejected. Produced once per write, consumed once by the dispatcher;
/// no replay, no deduplication.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub device_id: Option<String>,
    pub timestamp: Option<i64>,
    pub fields: BTreeMap<String, MeasurementValue>,
}

impl ChangeEvent {
    /// Event for a reading that was just written with the given change kind.
    pub fn for_reading(kind: ChangeKind, reading: &SensorReading) -> Self {
        Self {
            kind,
            device_id: Some(reading.device_id.clone()),
            timestamp: Some(reading.timestamp),
            fields: reading.fields.clone(),
        }
    }

    pub fn insert(
        device_id: impl Into<String>,
        timestamp: i64,
        fields: BTreeMap<String, MeasurementValue>,
    ) -> Self {
        Self {
            kind: ChangeKind::Insert,
            device_id: Some(device_id.into()),
            timestamp: Some(timestamp),
            fields,
        }
    }
}
