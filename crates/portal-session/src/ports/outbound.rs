//! Outbound Ports (Driven Ports / SPI)
//!
//! The identity provider and profile store behind the session store.

use crate::domain::entities::{Credentials, Identity, NewAccount, ProviderUser};
use crate::domain::errors::AuthError;
use async_trait::async_trait;

/// Auth gateway
///
/// Abstracts the hosted identity provider plus the `profiles` lookup.
/// Implementations hold whatever credential the provider issued; the
/// session store never sees tokens.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange email and password for a stored credential.
    async fn submit_credentials(&self, credentials: &Credentials) -> Result<ProviderUser, AuthError>;

    /// Create a credential plus a profile row carrying the name and role.
    ///
    /// Does not sign the new user in.
    async fn create_account(&self, account: &NewAccount) -> Result<(), AuthError>;

    /// Revoke the stored credential.
    async fn invalidate_credentials(&self) -> Result<(), AuthError>;

    /// Identity for the stored credential, if any.
    ///
    /// Fails closed: any failure along the way yields `None`.
    async fn resolve_current_identity(&self) -> Option<Identity>;
}
