use tokio::sync::watch;

/// Per-task handle that resolves once shutdown has been signalled.
pub struct ShutdownGuard {
    receiver: watch::Receiver<bool>,
}

impl ShutdownGuard {
    pub(crate) fn new(receiver: watch::Receiver<bool>) -> Self {
        Self { receiver }
    }

    /// Wait until shutdown is signalled. Also resolves if the coordinator
    /// is dropped, so tasks never outlive the server.
    pub async fn wait(&mut self) {
        while !*self.receiver.borrow() {
            if self.receiver.changed().await.is_err() {
                return;
            }
        }
    }
}
