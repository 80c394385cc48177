//! Auth gateway over the identity provider.

use super::wire::{PasswordGrant, SignUpMetadata, SignUpRequest, TokenResponse};
use super::RestBackend;
use crate::error::BackendError;
use async_trait::async_trait;
use portal_session::{
    resolve_identity, AuthError, AuthGateway, Credentials, Identity, NewAccount, ProfileRow,
    ProviderUser, UserId,
};
use tracing::{debug, info, warn};

impl RestBackend {
    async fn fetch_profile(&self, id: UserId, token: String) -> Result<Option<ProfileRow>, BackendError> {
        let rows: Vec<ProfileRow> = self
            .select(
                "profiles",
                vec![("id", format!("eq.{}", id)), ("select", "*".to_string())],
                token,
            )
            .await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl AuthGateway for RestBackend {
    async fn submit_credentials(&self, credentials: &Credentials) -> Result<ProviderUser, AuthError> {
        let request = self
            .post("/auth/v1/token")
            .query(&[("grant_type", "password")])
            .json(&PasswordGrant {
                email: &credentials.email,
                password: &credentials.password,
            });

        let response = self.send(request).await?;
        let tokens: TokenResponse = Self::parse(response).await?;
        self.store_tokens(&tokens)?;

        debug!(user_id = %tokens.user.id, "Password grant accepted");
        Ok(tokens.user.into())
    }

    async fn create_account(&self, account: &NewAccount) -> Result<(), AuthError> {
        let request = self.post("/auth/v1/signup").json(&SignUpRequest {
            email: &account.credentials.email,
            password: &account.credentials.password,
            data: SignUpMetadata {
                full_name: &account.full_name,
                role: account.role,
            },
        });

        // Any session the provider hands back is dropped: sign-up never
        // signs in.
        self.send(request).await?;
        info!(email = %account.credentials.email, role = %account.role, "Sign-up accepted");
        Ok(())
    }

    async fn invalidate_credentials(&self) -> Result<(), AuthError> {
        let stored = self.credentials.load().map_err(AuthError::from)?;

        // Cleared before the remote call: a failed logout leaves nothing stored.
        self.credentials.clear()?;

        let Some(credential) = stored else {
            return Ok(());
        };
        let request = self.post("/auth/v1/logout").bearer_auth(&credential.access_token);
        match self.send(request).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_unauthorized() => {
                debug!(user_id = %credential.user_id, "Token already revoked");
                Ok(())
            }
            Err(e) => {
                warn!(user_id = %credential.user_id, error = %e, "Logout request failed");
                Err(e.into())
            }
        }
    }

    async fn resolve_current_identity(&self) -> Option<Identity> {
        let user = match self.authorized(|token| self.fetch_user(token)).await {
            Ok(user) => user,
            Err(BackendError::NotSignedIn) => return None,
            Err(e) => {
                debug!(error = %e, "No current user");
                return None;
            }
        };

        let profile = self.authorized(|token| self.fetch_profile(user.id, token)).await;
        resolve_identity(Some(user.into()), profile)
    }
}
