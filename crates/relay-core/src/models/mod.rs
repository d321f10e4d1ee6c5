pub mod broadcast_payload;
pub mod change_event;
pub mod change_kind;
pub mod connection;
pub mod measurement_value;
pub mod sensor_reading;
