//! Credential persistence.
//!
//! The identity provider's token pair is kept between runs so the session
//! store can restore a session at startup.

use crate::error::BackendError;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use portal_session::UserId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Token pair issued by the identity provider.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredential {
    pub user_id: UserId,
    pub access_token: String,
    pub refresh_token: String,
    /// Access token expiry, if the provider reported one
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredCredential {
    /// Whether the access token is past its expiry at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

impl std::fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredCredential")
            .field("user_id", &self.user_id)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Where the credential lives between runs.
pub trait CredentialStore: Send + Sync {
    /// The stored credential, if any.
    fn load(&self) -> Result<Option<StoredCredential>, BackendError>;

    /// Replace the stored credential.
    fn save(&self, credential: &StoredCredential) -> Result<(), BackendError>;

    /// Forget the stored credential. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), BackendError>;
}

/// Credential kept in memory only; lost on exit.
#[derive(Default)]
pub struct MemoryCredentialStore {
    credential: Mutex<Option<StoredCredential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<StoredCredential>, BackendError> {
        Ok(self.credential.lock().clone())
    }

    fn save(&self, credential: &StoredCredential) -> Result<(), BackendError> {
        *self.credential.lock() = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), BackendError> {
        *self.credential.lock() = None;
        Ok(())
    }
}

/// Credential written as JSON to a file.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, action: &str, e: impl std::fmt::Display) -> BackendError {
        BackendError::Storage(format!("{} {}: {}", action, self.path.display(), e))
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<StoredCredential>, BackendError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.storage_error("read", e)),
        };

        match serde_json::from_str(&raw) {
            Ok(credential) => Ok(Some(credential)),
            Err(e) => {
                // A corrupt file is treated as signed out
                debug!(path = %self.path.display(), error = %e, "Ignoring unreadable credential file");
                Ok(None)
            }
        }
    }

    fn save(&self, credential: &StoredCredential) -> Result<(), BackendError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.storage_error("create", e))?;
        }
        let json = serde_json::to_string_pretty(credential).map_err(|e| self.storage_error("encode", e))?;
        fs::write(&self.path, json).map_err(|e| self.storage_error("write", e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(|e| self.storage_error("chmod", e))?;
        }

        Ok(())
    }

    fn clear(&self) -> Result<(), BackendError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.storage_error("remove", e)),
        }
    }
}
