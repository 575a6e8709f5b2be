//! One-shot teardown signal scoping subscriptions to a lifetime.

use std::sync::Arc;
use tokio::sync::watch;

/// A one-shot broadcast signal.
///
/// Services and components own one `Teardown` each; every pipeline wired
/// during construction is scoped to it. Firing is idempotent, and waiters
/// that attach after the fact resolve immediately.
#[derive(Clone)]
pub struct Teardown {
    tx: Arc<watch::Sender<bool>>,
}

impl Teardown {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Fires the signal. Safe to call more than once.
    pub fn fire(&self) {
        let _ = self.tx.send(true);
    }

    /// Whether the signal has fired.
    #[must_use]
    pub fn is_fired(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once the signal fires. Resolves immediately if it already
    /// has.
    pub async fn fired(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in self, so wait_for can only fail if self is
        // dropped mid-await, which cancels the future anyway.
        let _ = rx.wait_for(|fired| *fired).await;
    }
}

impl Default for Teardown {
    fn default() -> Self {
        Self::new()
    }
}
