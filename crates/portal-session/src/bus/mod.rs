//! Session notifications.
//!
//! Every transition of the session store is stamped with a sequence number
//! and broadcast to all subscribers in transition order.

pub mod publisher;
pub mod subscriber;

pub use publisher::{SessionBus, DEFAULT_EVENT_CAPACITY};
pub use subscriber::{SessionStream, SessionSubscription, SubscriptionError};
