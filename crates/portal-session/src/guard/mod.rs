//! Route authorization guard.
//!
//! Decides, per navigation, whether a view renders, waits for the session to
//! settle, or redirects. Decisions are computed from the live session on
//! every call and never cached.

pub mod decision;
pub mod routes;

pub use decision::{authorize, authorize_with, GuardDecision, GuardState, DEFAULT_LOGIN_PATH};
pub use routes::{RouteMatch, RouteTable};

use crate::domain::{RoleSet, RoutePath};
use crate::service::SessionStore;
use portal_telemetry::record_guard;
use tracing::debug;

/// Guard attached to a single view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteGuard {
    allowed: RoleSet,
    login_path: RoutePath,
}

impl RouteGuard {
    /// Guard admitting `allowed`, redirecting anonymous users to `/login`.
    pub fn new(allowed: RoleSet) -> Self {
        Self {
            allowed,
            login_path: RoutePath::new(DEFAULT_LOGIN_PATH),
        }
    }

    /// Use a different login path.
    pub fn with_login_path(mut self, login_path: RoutePath) -> Self {
        self.login_path = login_path;
        self
    }

    /// Guard for a resolved route, `None` for public or unknown routes.
    pub fn for_route(route: &RouteMatch, login_path: &RoutePath) -> Option<Self> {
        match route {
            RouteMatch::Guarded { allowed, .. } => {
                Some(Self::new(*allowed).with_login_path(login_path.clone()))
            }
            RouteMatch::Public(_) | RouteMatch::NotFound(_) => None,
        }
    }

    /// Admitted roles.
    pub fn allowed(&self) -> RoleSet {
        self.allowed
    }

    /// Decide against the store's current session.
    pub fn evaluate(&self, store: &SessionStore) -> GuardDecision {
        let session = store.session();
        let state = GuardState::classify(&session, &self.allowed);
        let decision = GuardDecision::from_state(state, &self.login_path);

        record_guard(state.label());
        debug!(
            allowed = %self.allowed,
            role = ?session.role(),
            decision = %decision,
            "Guard evaluated"
        );

        decision
    }
}
