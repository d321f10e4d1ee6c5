use metrics::{counter, gauge, histogram};

/// Metrics collector for registry and fan-out operations
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            prefix: "relay_ws",
        }
    }

    /// Record new connection established
    pub fn connection_established(&self) {
        counter!(format!("{}.connections.established", self.prefix)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).increment(1.0);
    }

    /// Record connection closed
    pub fn connection_closed(&self, reason: &str) {
        counter!(format!("{}.connections.closed", self.prefix)).increment(1);
        counter!(format!("{}.connections.closed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).decrement(1.0);
    }

    /// Record an insert event entering the dispatcher
    pub fn event_received(&self) {
        counter!(format!("{}.events.received", self.prefix)).increment(1);
    }

    /// Record a non-insert event skipped by the dispatcher
    pub fn event_ignored(&self, kind: &str) {
        counter!(format!("{}.events.ignored.{}", self.prefix, kind)).increment(1);
    }

    /// Record an event rejected by the payload translator
    pub fn translation_rejected(&self) {
        counter!(format!("{}.events.malformed", self.prefix)).increment(1);
    }

    /// Record one resolved delivery attempt
    pub fn delivery_resolved(&self, outcome: &str) {
        counter!(format!("{}.deliveries.total", self.prefix)).increment(1);
        counter!(format!("{}.deliveries.{}", self.prefix, outcome)).increment(1);
    }

    /// Record a completed fan-out batch
    pub fn broadcast_completed(&self, attempted: usize) {
        counter!(format!("{}.broadcasts.completed", self.prefix)).increment(1);
        histogram!(format!("{}.broadcasts.fan_out_size", self.prefix)).record(attempted as f64);
    }

    /// Record a registry storage failure
    pub fn registry_error(&self, operation: &str) {
        counter!(format!("{}.registry.errors.{}", self.prefix, operation)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
