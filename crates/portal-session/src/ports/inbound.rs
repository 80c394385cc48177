//! Inbound Ports (Driving Ports / API)

use crate::bus::SessionSubscription;
use crate::domain::entities::{Identity, Session};
use crate::domain::errors::{AuthError, SessionError};
use crate::domain::value_objects::Role;
use async_trait::async_trait;

/// Session API consumed by the host router and the dashboard shell.
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Restore a persisted session, if any. Never fails; a failed or timed
    /// out restoration settles as anonymous.
    async fn initialize(&self) -> Session;

    /// Authenticate and establish a session.
    ///
    /// On failure the previous session is left in place.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, SessionError>;

    /// Create an account. Does not establish a session.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        role: Role,
    ) -> Result<(), AuthError>;

    /// End the session. Always clears local state.
    async fn sign_out(&self) -> Session;

    /// Re-resolve the identity without a loading flash.
    async fn refresh(&self) -> Session;

    /// Current snapshot.
    fn session(&self) -> Session;

    /// Observe every transition from now on.
    fn subscribe(&self) -> SessionSubscription;
}
