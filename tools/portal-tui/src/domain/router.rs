//! Host router.
//!
//! Holds the current path and turns it into a view by running the route
//! guard against the live session. Evaluated on every frame, so a session
//! change takes effect on the next draw without any event wiring.

use portal_session::{GuardDecision, RouteGuard, RouteMatch, RoutePath, RouteTable, Session, SessionStore};
use tracing::debug;

use super::navigation::Page;

/// Redirect chains longer than this are treated as not found.
const MAX_REDIRECTS: usize = 4;

/// What to draw for the current path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Session not settled yet
    Loading,
    Page(Page),
}

pub struct Router {
    table: RouteTable,
    login_path: RoutePath,
    current: RoutePath,
}

impl Router {
    pub fn new(table: RouteTable, login_path: RoutePath) -> Self {
        Self {
            table,
            login_path,
            current: RoutePath::root(),
        }
    }

    pub fn current(&self) -> &RoutePath {
        &self.current
    }

    pub fn login_path(&self) -> &RoutePath {
        &self.login_path
    }

    /// Push a new path. Authorization happens on the next [`Router::resolve`].
    pub fn navigate(&mut self, raw: &str) {
        let next = RoutePath::new(raw);
        if next != self.current {
            debug!(from = %self.current, to = %next, "Navigate");
            self.current = next;
        }
    }

    /// Run the guard for the current path, following redirects.
    pub fn resolve(&mut self, store: &SessionStore) -> View {
        for _ in 0..MAX_REDIRECTS {
            let route = self.table.resolve(self.current.as_str());
            let decision = match &route {
                RouteMatch::Public(path) => self.public_decision(path, &store.session()),
                RouteMatch::Guarded { .. } => match RouteGuard::for_route(&route, &self.login_path) {
                    Some(guard) => guard.evaluate(store),
                    None => GuardDecision::Allow,
                },
                RouteMatch::NotFound(path) => return View::Page(Page::NotFound(path.clone())),
            };

            match decision {
                GuardDecision::Suspend => return View::Loading,
                GuardDecision::Allow => return View::Page(Page::for_route(&route)),
                GuardDecision::Redirect(to) => {
                    debug!(from = %self.current, to = %to, "Redirect");
                    self.current = to;
                }
            }
        }
        View::Page(Page::NotFound(self.current.clone()))
    }

    /// Landing and login pages send a signed-in user to their dashboard.
    /// The landing page also waits for restoration.
    fn public_decision(&self, path: &RoutePath, session: &Session) -> GuardDecision {
        let is_entry = *path == RoutePath::root() || *path == self.login_path;
        if !is_entry {
            return GuardDecision::Allow;
        }
        match session.role() {
            Some(role) => GuardDecision::Redirect(role.home_path()),
            None if session.is_loading() && *path == RoutePath::root() => GuardDecision::Suspend,
            None => GuardDecision::Allow,
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(RouteTable::portal(), RoutePath::new("/login"))
    }
}
