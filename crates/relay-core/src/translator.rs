use crate::{BroadcastPayload, ChangeEvent, CoreError, Result};

/// Project a change event into the wire payload sent to subscribers.
///
/// Pure and synchronous. Events missing `device_id` or `timestamp` are
/// rejected as malformed; retrying an unidentifiable record cannot
/// succeed, so callers drop it. Measurement fields pass through by value
/// with their numeric/string type intact.
#[track_caller]
pub fn translate(event: &ChangeEvent) -> Result<BroadcastPayload> {
    let device_id = match event.device_id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => return Err(CoreError::malformed("device_id")),
    };

    let timestamp = event
        .timestamp
        .ok_or_else(|| CoreError::malformed("timestamp"))?;

    Ok(BroadcastPayload {
        device_id,
        timestamp,
        fields: event.fields.clone(),
    })
}
