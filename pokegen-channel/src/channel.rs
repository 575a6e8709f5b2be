//! The channel primitive.

use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::debug;

/// Retention policy for a channel.
enum Retention<T> {
    /// No retained values.
    Event,
    /// The most recent value, if any.
    Latest(Option<T>),
    /// Every value ever emitted.
    Replay(Vec<T>),
}

struct Inner<T> {
    retention: Retention<T>,
    subscribers: Vec<mpsc::UnboundedSender<T>>,
    closed: bool,
}

/// A typed broadcast channel.
///
/// Cloning a `Channel` clones a handle to the same underlying channel.
/// Values must be `Clone` because every subscriber receives its own copy;
/// anything expensive to copy travels behind an `Arc`.
pub struct Channel<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> Channel<T> {
    fn with_retention(retention: Retention<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                retention,
                subscribers: Vec::new(),
                closed: false,
            })),
        }
    }

    /// A latest-value channel seeded with an initial value.
    #[must_use]
    pub fn latest(initial: T) -> Self {
        Self::with_retention(Retention::Latest(Some(initial)))
    }

    /// A latest-value channel with no value yet.
    #[must_use]
    pub fn latest_empty() -> Self {
        Self::with_retention(Retention::Latest(None))
    }

    /// A replay channel: subscribers receive the full emission history.
    #[must_use]
    pub fn replay() -> Self {
        Self::with_retention(Retention::Replay(Vec::new()))
    }

    /// An event channel: no retention.
    #[must_use]
    pub fn event() -> Self {
        Self::with_retention(Retention::Event)
    }

    /// Emits a value to all current subscribers, updating the retained
    /// state. Emitting on a closed channel is a no-op.
    pub fn emit(&self, value: T) {
        let mut inner = self.inner.lock().expect("channel lock poisoned");
        if inner.closed {
            debug!("emit on closed channel dropped");
            return;
        }
        match &mut inner.retention {
            Retention::Event => {}
            Retention::Latest(current) => *current = Some(value.clone()),
            Retention::Replay(history) => history.push(value.clone()),
        }
        // Drop subscribers whose receiving side is gone.
        inner.subscribers.retain(|tx| tx.send(value.clone()).is_ok());
    }

    /// Attaches a new subscriber. Retained values are delivered first, then
    /// live emissions in emission order.
    #[must_use]
    pub fn subscribe(&self) -> Subscription<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock().expect("channel lock poisoned");
        match &inner.retention {
            Retention::Event => {}
            Retention::Latest(current) => {
                if let Some(value) = current {
                    let _ = tx.send(value.clone());
                }
            }
            Retention::Replay(history) => {
                for value in history {
                    let _ = tx.send(value.clone());
                }
            }
        }
        if !inner.closed {
            inner.subscribers.push(tx);
        }
        Subscription { rx }
    }

    /// The current value of a latest-value channel. `None` for an empty
    /// latest channel and for other retention policies.
    #[must_use]
    pub fn current(&self) -> Option<T> {
        let inner = self.inner.lock().expect("channel lock poisoned");
        match &inner.retention {
            Retention::Latest(current) => current.clone(),
            _ => None,
        }
    }

    /// Closes the channel: subscribers see end-of-stream and later emits
    /// are dropped.
    pub fn close(&self) {
        let mut inner = self.inner.lock().expect("channel lock poisoned");
        inner.closed = true;
        inner.subscribers.clear();
    }

    /// Number of attached subscribers, for diagnostics.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().expect("channel lock poisoned").subscribers.len()
    }
}

/// A live subscription to a [`Channel`].
///
/// Dropping the subscription detaches it.
pub struct Subscription<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> Subscription<T> {
    /// Waits for the next value. Returns `None` once the channel is closed
    /// and the backlog is drained.
    pub async fn next(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Takes the next value only if one is already queued.
    pub fn try_next(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }
}
