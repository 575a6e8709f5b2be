//! Generation counters for cancellation-by-discard.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A monotonically increasing generation counter for one pipeline stage.
///
/// There is no way to interrupt an in-flight operation; instead every
/// accepted input is issued a [`Ticket`], and a completed operation is only
/// applied when its ticket is still the latest one issued. A stale result
/// is dropped on arrival and must not touch shared state (in particular,
/// it must not lower a busy flag a newer operation raised).
pub struct LatestGate {
    current: Arc<AtomicU64>,
}

impl LatestGate {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Issues the next generation, superseding all earlier tickets.
    #[must_use]
    pub fn issue(&self) -> Ticket {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            generation,
            current: Arc::clone(&self.current),
        }
    }
}

impl Default for LatestGate {
    fn default() -> Self {
        Self::new()
    }
}

/// A claim on one generation of a [`LatestGate`].
pub struct Ticket {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl Ticket {
    /// Whether no newer ticket has been issued since this one.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }

    /// The generation this ticket was issued at.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
