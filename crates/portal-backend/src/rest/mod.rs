//! REST adapter for the hosted backend.
//!
//! Talks to the identity provider under `/auth/v1` and the data API under
//! `/rest/v1`. Every request carries the public `apikey`; data requests and
//! user lookups add the signed-in user's bearer token.

mod auth;
mod records;
pub mod wire;

use crate::config::BackendConfig;
use crate::credentials::{CredentialStore, FileCredentialStore, StoredCredential};
use crate::error::BackendError;
use chrono::{Duration as TimeDelta, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};
use wire::{ErrorBody, RefreshGrant, TokenResponse, UserBody};

/// Backend adapter over HTTP.
pub struct RestBackend {
    client: Client,
    config: BackendConfig,
    credentials: Arc<dyn CredentialStore>,
}

impl RestBackend {
    /// Create an adapter that persists the credential under the configured
    /// data directory.
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let store = Arc::new(FileCredentialStore::new(config.credential_path()));
        Self::with_credential_store(config, store)
    }

    /// Create an adapter with a specific credential store.
    pub fn with_credential_store(
        config: BackendConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(BackendError::Http)?;

        Ok(Self {
            client,
            config,
            credentials,
        })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base(), path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(self.url(path))
            .header("apikey", &self.config.anon_key)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(self.url(path))
            .header("apikey", &self.config.anon_key)
    }

    /// Send a request; non-success statuses become [`BackendError::Status`].
    async fn send(&self, request: RequestBuilder) -> Result<Response, BackendError> {
        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                BackendError::Connection(format!("Cannot connect to {}", self.config.base()))
            } else {
                BackendError::Http(e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: ErrorBody = response.json().await.unwrap_or_default();
        let message = body
            .message()
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
        debug!(status = status.as_u16(), code = ?body.code(), message = %message, "Backend request failed");
        Err(BackendError::Status {
            status: status.as_u16(),
            code: body.code(),
            message,
        })
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }

    /// Persist a freshly issued token pair.
    fn store_tokens(&self, tokens: &TokenResponse) -> Result<StoredCredential, BackendError> {
        let credential = StoredCredential {
            user_id: tokens.user.id,
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            expires_at: tokens
                .expires_in
                .map(|secs| Utc::now() + TimeDelta::seconds(secs)),
        };
        self.credentials.save(&credential)?;
        Ok(credential)
    }

    /// Exchange the refresh token for a new pair. A rejected refresh token
    /// clears the stored credential.
    async fn refresh(&self, credential: &StoredCredential) -> Result<StoredCredential, BackendError> {
        let request = self
            .post("/auth/v1/token")
            .query(&[("grant_type", "refresh_token")])
            .json(&RefreshGrant {
                refresh_token: &credential.refresh_token,
            });

        match self.send(request).await {
            Ok(response) => {
                let tokens: TokenResponse = Self::parse(response).await?;
                debug!(user_id = %tokens.user.id, "Access token refreshed");
                self.store_tokens(&tokens)
            }
            Err(e @ BackendError::Status { .. }) => {
                warn!(user_id = %credential.user_id, error = %e, "Refresh rejected, forgetting credential");
                self.credentials.clear()?;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Stored credential, refreshed first if it has expired.
    async fn valid_credential(&self) -> Result<StoredCredential, BackendError> {
        let credential = self.credentials.load()?.ok_or(BackendError::NotSignedIn)?;
        if credential.is_expired(Utc::now()) {
            return self.refresh(&credential).await;
        }
        Ok(credential)
    }

    /// Run `call` with a bearer token, refreshing and retrying once if the
    /// token is rejected.
    async fn authorized<T, F, Fut>(&self, call: F) -> Result<T, BackendError>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T, BackendError>>,
    {
        let credential = self.valid_credential().await?;
        match call(credential.access_token.clone()).await {
            Err(e) if e.is_unauthorized() => {
                debug!(user_id = %credential.user_id, "Bearer token rejected, refreshing");
                let credential = self.refresh(&credential).await?;
                call(credential.access_token).await
            }
            other => other,
        }
    }

    async fn fetch_user(&self, token: String) -> Result<UserBody, BackendError> {
        let response = self.send(self.get("/auth/v1/user").bearer_auth(token)).await?;
        Self::parse(response).await
    }

    /// GET rows from a data API table.
    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: Vec<(&'static str, String)>,
        token: String,
    ) -> Result<Vec<T>, BackendError> {
        let request = self
            .get(&format!("/rest/v1/{}", table))
            .query(&query)
            .bearer_auth(token);
        let response = self.send(request).await?;
        Self::parse(response).await
    }
}
