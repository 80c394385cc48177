//! Domain invariants for the session core
//!
//! Identity resolution fails closed: anything short of a credential plus a
//! matching, well-formed profile row yields no identity.

use super::entities::{Identity, ProfileRow, ProviderUser, Session};
use std::fmt::Display;
use tracing::debug;

/// Combine the provider's current user with the result of the profile lookup.
///
/// Returns `None` when there is no user, the lookup failed, no profile row
/// exists, the row belongs to a different user, or the role is unknown.
pub fn resolve_identity<E: Display>(
    user: Option<ProviderUser>,
    profile: Result<Option<ProfileRow>, E>,
) -> Option<Identity> {
    let user = user?;

    let row = match profile {
        Ok(Some(row)) => row,
        Ok(None) => {
            debug!(user_id = %user.id, "No profile row for authenticated user");
            return None;
        }
        Err(e) => {
            debug!(user_id = %user.id, error = %e, "Profile lookup failed");
            return None;
        }
    };

    if row.id != user.id {
        debug!(user_id = %user.id, profile_id = %row.id, "Profile belongs to another user");
        return None;
    }

    let role = row.role.clone();
    let identity = row.into_identity();
    if identity.is_none() {
        debug!(user_id = %user.id, role = %role, "Profile has an unknown role");
    }
    identity
}

/// INVARIANT: a session either has no identity or one carrying an email or
/// a display name.
pub fn invariant_settled_identity(session: &Session) -> bool {
    match &session.identity {
        None => true,
        Some(identity) => !identity.email.is_empty() || !identity.full_name.is_empty(),
    }
}

/// INVARIANT: the role of a live session never changes. Moving between two
/// authenticated snapshots of the same user must keep the role.
pub fn invariant_role_immutable(before: &Session, after: &Session) -> bool {
    match (&before.identity, &after.identity) {
        (Some(a), Some(b)) if a.id == b.id => a.role == b.role,
        _ => true,
    }
}
