//! # Session Subscriber
//!
//! Receiving side of session notifications.

use crate::domain::SessionEvent;
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use tokio_stream::Stream;
use tracing::warn;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The session store was dropped.
    #[error("Session bus closed")]
    Closed,
}

/// Handle for receiving session transitions.
///
/// A subscriber that falls more than the channel capacity behind skips the
/// oldest events; it never sees them out of order.
pub struct SessionSubscription {
    receiver: broadcast::Receiver<SessionEvent>,
}

impl SessionSubscription {
    pub(crate) fn new(receiver: broadcast::Receiver<SessionEvent>) -> Self {
        Self { receiver }
    }

    /// Receive the next event.
    ///
    /// Returns `None` once the store is gone.
    pub async fn recv(&mut self) -> Option<SessionEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    warn!(lagged = count, "Session subscriber lagged, events skipped");
                }
            }
        }
    }

    /// Receive without waiting.
    ///
    /// - `Ok(Some(event))` - an event was queued
    /// - `Ok(None)` - nothing queued
    /// - `Err(SubscriptionError::Closed)` - the store is gone
    pub fn try_recv(&mut self) -> Result<Option<SessionEvent>, SubscriptionError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Ok(Some(event)),
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(count)) => {
                    warn!(lagged = count, "Session subscriber lagged, events skipped");
                }
            }
        }
    }

    /// Drain everything queued, oldest first.
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = self.try_recv() {
            events.push(event);
        }
        events
    }

    /// Convert into a `Stream`.
    pub fn into_stream(self) -> SessionStream {
        SessionStream::new(self.receiver)
    }
}

/// Session transitions as a `tokio_stream::Stream`.
pub struct SessionStream {
    inner: BroadcastStream<SessionEvent>,
}

impl SessionStream {
    pub(crate) fn new(receiver: broadcast::Receiver<SessionEvent>) -> Self {
        Self {
            inner: BroadcastStream::new(receiver),
        }
    }
}

impl Stream for SessionStream {
    type Item = SessionEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match Pin::new(&mut self.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(event))) => return Poll::Ready(Some(event)),
                Poll::Ready(Some(Err(BroadcastStreamRecvError::Lagged(count)))) => {
                    warn!(lagged = count, "Session stream lagged, events skipped");
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
