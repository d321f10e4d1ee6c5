use crate::DeliveryOutcome;

/// Outcome tally for one event's fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Delivery attempts made (one per live connection in the snapshot).
    pub attempted: usize,
    pub delivered: usize,
    /// Connections confirmed gone and deregistered.
    pub pruned: usize,
    /// Transient failures left registered for the next event.
    pub transient: usize,
    /// True when the event was not an insert and no fan-out ran.
    pub ignored: bool,
}

impl DispatchSummary {
    pub fn ignored() -> Self {
        Self {
            ignored: true,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: &DeliveryOutcome) {
        self.attempted += 1;
        match outcome {
            DeliveryOutcome::Success => self.delivered += 1,
            DeliveryOutcome::Gone => self.pruned += 1,
            DeliveryOutcome::Transient { .. } => self.transient += 1,
        }
    }
}

impl std::fmt::Display for DispatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.ignored {
            return write!(f, "ignored (not an insert)");
        }
        write!(
            f,
            "{} delivered, {} pruned, {} transient of {} attempted",
            self.delivered, self.pruned, self.transient, self.attempted
        )
    }
}
