//! Error types for the session core

use thiserror::Error;

/// Failures reported by the identity provider or raised while validating
/// input. Displayed verbatim to the user on the login page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Email or password rejected
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// Sign-up for an email that already has an account
    #[error("User already registered")]
    AccountExists,

    /// Account exists but the email link was never followed
    #[error("Email not confirmed")]
    EmailNotConfirmed,

    /// Rejected locally before any provider call
    #[error("{0}")]
    InvalidInput(String),

    /// Authenticated but no matching profile row
    #[error("No profile found for this account")]
    ProfileMissing,

    /// Provider unreachable
    #[error("Network error: {0}")]
    Network(String),

    /// Any other provider response
    #[error("{message}")]
    Service { status: u16, message: String },
}

impl AuthError {
    /// Shorthand for [`AuthError::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Whether the error came from local validation.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Errors returned by session store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The gateway or validation rejected the operation
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A sign-out or invalidation started while this operation was pending;
    /// its result was discarded
    #[error("Superseded by a later sign-out")]
    Superseded,
}

impl SessionError {
    /// The underlying auth error, if any.
    pub fn auth(&self) -> Option<&AuthError> {
        match self {
            Self::Auth(e) => Some(e),
            Self::Superseded => None,
        }
    }
}
