//! Authorization decisions for guarded views.

use crate::domain::{Role, RoleSet, RoutePath, Session};
use std::fmt;

/// Where a session stands relative to a guarded view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GuardState {
    /// Restoration or a transition is in flight
    Loading,
    /// Nobody is signed in
    Unauthenticated,
    /// Signed in with a role the view does not admit
    WrongRole(Role),
    /// Signed in with an admitted role
    Allowed,
}

impl GuardState {
    /// Classify a session against a view's allowed roles.
    pub fn classify(session: &Session, allowed: &RoleSet) -> Self {
        if session.is_loading() {
            return GuardState::Loading;
        }
        match session.role() {
            None => GuardState::Unauthenticated,
            Some(role) if allowed.permits(role) => GuardState::Allowed,
            Some(role) => GuardState::WrongRole(role),
        }
    }

    /// Metric label; the two redirect kinds are counted apart.
    pub fn label(&self) -> &'static str {
        match self {
            GuardState::Loading => "suspend",
            GuardState::Allowed => "allow",
            GuardState::Unauthenticated => "redirect_login",
            GuardState::WrongRole(_) => "redirect_home",
        }
    }
}

/// What the host router should do with a navigation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GuardDecision {
    /// Show a loading indicator and re-evaluate once settled
    Suspend,
    /// Render the view
    Allow,
    /// Replace the current path
    Redirect(RoutePath),
}

impl GuardDecision {
    /// Decision for a classified state, redirecting anonymous users to
    /// `login_path`.
    pub fn from_state(state: GuardState, login_path: &RoutePath) -> Self {
        match state {
            GuardState::Loading => GuardDecision::Suspend,
            GuardState::Unauthenticated => GuardDecision::Redirect(login_path.clone()),
            GuardState::WrongRole(role) => GuardDecision::Redirect(role.home_path()),
            GuardState::Allowed => GuardDecision::Allow,
        }
    }

    /// Whether the view may render.
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

impl From<GuardState> for GuardDecision {
    fn from(state: GuardState) -> Self {
        GuardDecision::from_state(state, &RoutePath::new(DEFAULT_LOGIN_PATH))
    }
}

impl fmt::Display for GuardDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardDecision::Suspend => f.write_str("suspend"),
            GuardDecision::Allow => f.write_str("allow"),
            GuardDecision::Redirect(path) => write!(f, "redirect {}", path),
        }
    }
}

/// Login route used when no other is configured.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Decide a navigation with the default login path.
///
/// Pure: the same session and role set always give the same decision.
pub fn authorize(session: &Session, allowed: &RoleSet) -> GuardDecision {
    GuardState::classify(session, allowed).into()
}

/// Decide a navigation with an explicit login path.
pub fn authorize_with(session: &Session, allowed: &RoleSet, login_path: &RoutePath) -> GuardDecision {
    GuardDecision::from_state(GuardState::classify(session, allowed), login_path)
}
