//! Request and response bodies of the identity provider and data API.

use portal_session::{ProviderUser, Role, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct PasswordGrant<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RefreshGrant<'a> {
    pub refresh_token: &'a str,
}

/// Metadata copied onto the profile row by the provider's sign-up trigger.
#[derive(Debug, Serialize)]
pub struct SignUpMetadata<'a> {
    pub full_name: &'a str,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct SignUpRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub data: SignUpMetadata<'a>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserBody {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<UserBody> for ProviderUser {
    fn from(user: UserBody) -> Self {
        ProviderUser {
            id: user.id,
            email: user.email,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: UserBody,
}

/// Error body. The identity provider and the data API use different field
/// names across versions; every known one is accepted.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Data API error code (`42P01` etc.); numeric on the identity provider
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Most specific machine-readable code.
    pub fn code(&self) -> Option<String> {
        self.error_code
            .clone()
            .or_else(|| self.error.clone())
            .or_else(|| match &self.code {
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                _ => None,
            })
    }

    /// Human-readable message.
    pub fn message(&self) -> Option<String> {
        self.msg
            .clone()
            .or_else(|| self.error_description.clone())
            .or_else(|| self.message.clone())
            .or_else(|| self.error.clone())
    }
}
