pub mod error;
pub mod models;
pub mod translator;

pub use error::{CoreError, Result};
pub use models::broadcast_payload::BroadcastPayload;
pub use models::change_event::ChangeEvent;
pub use models::change_kind::ChangeKind;
pub use models::connection::Connection;
pub use models::measurement_value::MeasurementValue;
pub use models::sensor_reading::SensorReading;
pub use translator::translate;

pub use error_location::ErrorLocation;

#[cfg(test)]
mod tests;
