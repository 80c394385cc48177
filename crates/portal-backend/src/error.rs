//! Backend errors and their mapping onto the port error types.

use portal_records::RecordsError;
use portal_session::AuthError;
use thiserror::Error;

/// Errors that can occur when talking to the hosted backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Non-success status with the provider's message
    #[error("{message}")]
    Status {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Credential storage failed: {0}")]
    Storage(String),
}

impl BackendError {
    fn code_or_message_is(&self, codes: &[&str], message: &str) -> bool {
        match self {
            BackendError::Status { code, message: m, .. } => {
                code.as_deref().is_some_and(|c| codes.contains(&c)) || m.eq_ignore_ascii_case(message)
            }
            _ => false,
        }
    }

    /// Whether the bearer token was rejected.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, BackendError::Status { status: 401 | 403, .. })
    }
}

impl From<BackendError> for AuthError {
    fn from(err: BackendError) -> Self {
        if err.code_or_message_is(&["invalid_credentials", "invalid_grant"], "Invalid login credentials") {
            return AuthError::InvalidCredentials;
        }
        if err.code_or_message_is(&["user_already_exists", "email_exists"], "User already registered") {
            return AuthError::AccountExists;
        }
        if err.code_or_message_is(&["email_not_confirmed"], "Email not confirmed") {
            return AuthError::EmailNotConfirmed;
        }

        match err {
            BackendError::Http(e) => AuthError::Network(e.to_string()),
            BackendError::Connection(message) => AuthError::Network(message),
            BackendError::Status { status, message, .. } => AuthError::Service { status, message },
            other => AuthError::Service {
                status: 0,
                message: other.to_string(),
            },
        }
    }
}

impl From<BackendError> for RecordsError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotSignedIn => RecordsError::Unauthenticated,
            other => RecordsError::Source(other.to_string()),
        }
    }
}
