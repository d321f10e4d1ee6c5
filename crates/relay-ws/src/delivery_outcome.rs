/// The resolution of one unicast delivery attempt.
///
/// A failed send is data, not an error: the dispatcher classifies every
/// attempt into exactly one of these and handles each kind differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The payload was handed to the peer's session.
    Success,
    /// The target connection no longer exists; it should be removed from
    /// the registry.
    Gone,
    /// Temporary failure. The peer may still be reachable on the next
    /// event, so it stays registered. Never retried within the same cycle.
    Transient { reason: String },
}

impl DeliveryOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Gone => "gone",
            Self::Transient { .. } => "transient",
        }
    }
}
