//! # Session Bus
//!
//! Publishing side of session notifications.

use crate::bus::subscriber::{SessionStream, SessionSubscription};
use crate::domain::{Session, SessionEvent, Transition};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Default channel capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Broadcast channel carrying every session transition in order.
///
/// `publish` is synchronous so the store can call it inside the same
/// critical section as the state write it reports.
pub struct SessionBus {
    /// Broadcast sender for events.
    sender: broadcast::Sender<SessionEvent>,

    /// Last sequence number handed out.
    sequence: AtomicU64,

    /// Channel capacity.
    capacity: usize,
}

impl SessionBus {
    /// Create a bus with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Create a bus with the given capacity (at least 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            sequence: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscribe to transitions published from now on.
    #[must_use]
    pub fn subscribe(&self) -> SessionSubscription {
        debug!(subscribers = self.sender.receiver_count() + 1, "New session subscription");
        SessionSubscription::new(self.sender.subscribe())
    }

    /// Subscribe as a `Stream`.
    #[must_use]
    pub fn stream(&self) -> SessionStream {
        SessionStream::new(self.sender.subscribe())
    }

    /// Stamp and broadcast a transition. Returns the event sent.
    pub fn publish(&self, transition: Transition, session: Session) -> SessionEvent {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let event = SessionEvent {
            sequence,
            transition,
            session,
        };

        match self.sender.send(event.clone()) {
            Ok(receivers) => {
                trace!(sequence, transition = %transition, receivers, "Session event published");
            }
            Err(_) => {
                trace!(sequence, transition = %transition, "Session event dropped (no receivers)");
            }
        }

        event
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Sequence number of the most recent event, 0 before the first.
    #[must_use]
    pub fn last_sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for SessionBus {
    fn default() -> Self {
        Self::new()
    }
}
