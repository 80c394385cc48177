//! Core entities for the session core.
//!
//! `Identity` is the only thing views ever learn about the signed-in user.
//! `Session` is owned by the session store; everything else sees snapshots.

use super::value_objects::{Role, RoutePath, UserId};
use serde::{Deserialize, Serialize};

/// The authenticated user's stable id, email, display name and role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider credential id, also the `profiles` primary key
    pub id: UserId,
    /// Email address
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Role, fixed for the lifetime of a session
    pub role: Role,
    /// Optional avatar image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Identity {
    /// Create an identity without an avatar.
    pub fn new(id: UserId, email: impl Into<String>, full_name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            email: email.into(),
            full_name: full_name.into(),
            role,
            avatar_url: None,
        }
    }

    /// Attach an avatar URL.
    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    /// Upper-cased first letter of the display name, `U` when blank.
    pub fn initial(&self) -> char {
        self.full_name
            .trim()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('U')
    }

    /// Where this user lands after sign-in or a wrong-role redirect.
    pub fn home_path(&self) -> RoutePath {
        self.role.home_path()
    }
}

/// Readiness of the session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Restoration or an explicit sign-in/sign-out is in flight
    #[default]
    Loading,
    /// Settled
    Ready,
}

/// Process-wide authentication state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    /// Readiness
    pub status: SessionStatus,
    /// Present only when authenticated
    pub identity: Option<Identity>,
}

impl Session {
    /// State at application start: loading, nobody signed in.
    pub fn loading() -> Self {
        Self {
            status: SessionStatus::Loading,
            identity: None,
        }
    }

    /// Settled and unauthenticated.
    pub fn anonymous() -> Self {
        Self {
            status: SessionStatus::Ready,
            identity: None,
        }
    }

    /// Settled and authenticated.
    pub fn authenticated(identity: Identity) -> Self {
        Self {
            status: SessionStatus::Ready,
            identity: Some(identity),
        }
    }

    /// Whether a transition is in flight.
    pub fn is_loading(&self) -> bool {
        self.status == SessionStatus::Loading
    }

    /// Whether someone is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Role of the signed-in user.
    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|i| i.role)
    }

    /// Id of the signed-in user.
    pub fn user_id(&self) -> Option<UserId> {
        self.identity.as_ref().map(|i| i.id)
    }
}

/// The authenticated account as the identity provider sees it, before the
/// profile row is joined in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderUser {
    /// Credential id
    pub id: UserId,
    /// Email on the credential
    #[serde(default)]
    pub email: Option<String>,
}

/// A row of the `profiles` table.
///
/// `role` stays a string here: the table is loosely typed and an unknown
/// role must fail closed rather than fail to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRow {
    /// Primary key, equal to the credential id
    pub id: UserId,
    /// Email
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Raw role string
    pub role: String,
    /// Avatar URL
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl ProfileRow {
    /// Convert to an identity; `None` if the role is not one we know.
    pub fn into_identity(self) -> Option<Identity> {
        let role = self.role.parse::<Role>().ok()?;
        Some(Identity {
            id: self.id,
            email: self.email,
            full_name: self.full_name,
            role,
            avatar_url: self.avatar_url,
        })
    }
}

impl From<&Identity> for ProfileRow {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email.clone(),
            full_name: identity.full_name.clone(),
            role: identity.role.as_str().to_string(),
            avatar_url: identity.avatar_url.clone(),
        }
    }
}

/// Email and password as typed into the login form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Email address
    pub email: String,
    /// Plain-text password, never logged
    pub password: String,
}

impl Credentials {
    /// Create credentials, trimming the email.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything needed to create an account and its profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Login credentials
    pub credentials: Credentials,
    /// Display name stored on the profile
    pub full_name: String,
    /// Role stored on the profile
    pub role: Role,
}

impl NewAccount {
    /// Create a sign-up request.
    pub fn new(credentials: Credentials, full_name: impl Into<String>, role: Role) -> Self {
        Self {
            credentials,
            full_name: full_name.into().trim().to_string(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str) -> Identity {
        Identity::new(UserId::new(), "a@b.com", name, Role::Student)
    }

    #[test]
    fn test_initial() {
        assert_eq!(identity("ada lovelace").initial(), 'A');
        assert_eq!(identity("  émile").initial(), 'É');
        assert_eq!(identity("").initial(), 'U');
    }

    #[test]
    fn test_session_constructors() {
        let s = Session::loading();
        assert!(s.is_loading());
        assert!(!s.is_authenticated());

        let s = Session::anonymous();
        assert!(!s.is_loading());
        assert_eq!(s.role(), None);

        let s = Session::authenticated(identity("Ada"));
        assert_eq!(s.role(), Some(Role::Student));
        assert!(s.user_id().is_some());
    }

    #[test]
    fn test_profile_row_unknown_role_fails_closed() {
        let row = ProfileRow {
            id: UserId::new(),
            email: "a@b.com".into(),
            full_name: "Ada".into(),
            role: "janitor".into(),
            avatar_url: None,
        };
        assert!(row.into_identity().is_none());
    }

    #[test]
    fn test_profile_row_deserializes_loose_json() {
        let id = UserId::new();
        let json = format!(
            r#"{{"id":"{id}","email":"t@u.edu","full_name":"Tess","role":"teacher","created_at":"2024-01-01"}}"#
        );
        let row: ProfileRow = serde_json::from_str(&json).expect("row");
        let identity = row.into_identity().expect("identity");
        assert_eq!(identity.role, Role::Teacher);
        assert_eq!(identity.avatar_url, None);
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new(" a@b.com ", "hunter2");
        assert_eq!(creds.email, "a@b.com");
        let dbg = format!("{:?}", creds);
        assert!(!dbg.contains("hunter2"));
    }
}
