use crate::ShutdownGuard;

use tokio::sync::watch;

/// Coordinates graceful shutdown across connection tasks.
///
/// Clone freely; all clones share one switch. Flipping it is idempotent.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    sender: watch::Sender<bool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender }
    }

    /// Signal shutdown to every guard.
    pub fn shutdown(&self) {
        let _ = self.sender.send(true);
    }

    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard::new(self.sender.subscribe())
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
