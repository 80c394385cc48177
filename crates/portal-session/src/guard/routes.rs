//! Route table for the portal.
//!
//! Public routes need no session. Every path under a role's dashboard is
//! guarded for that role alone; anything unlisted is not found.

use crate::domain::{Role, RoleSet, RoutePath};

/// Result of looking a path up in the route table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteMatch {
    /// Reachable without a session
    Public(RoutePath),
    /// Reachable only by the given roles
    Guarded {
        /// Normalized path
        path: RoutePath,
        /// Admitted roles
        allowed: RoleSet,
    },
    /// No such route
    NotFound(RoutePath),
}

impl RouteMatch {
    /// The normalized path that was resolved.
    pub fn path(&self) -> &RoutePath {
        match self {
            RouteMatch::Public(path) | RouteMatch::NotFound(path) => path,
            RouteMatch::Guarded { path, .. } => path,
        }
    }
}

#[derive(Clone, Debug)]
struct RouteEntry {
    path: RoutePath,
    allowed: Option<RoleSet>,
}

/// Declared routes plus the role-prefix rule.
#[derive(Clone, Debug)]
pub struct RouteTable {
    routes: Vec<RouteEntry>,
}

impl RouteTable {
    /// Empty table: only the prefix rule applies.
    pub fn empty() -> Self {
        Self { routes: Vec::new() }
    }

    /// Routes of the university portal.
    pub fn portal() -> Self {
        let student = RoleSet::only(Role::Student);
        Self::empty()
            .public("/")
            .public("/about")
            .public("/login")
            .guarded("/student", student)
            .guarded("/student/attendance", student)
            .guarded("/student/schedule", student)
            .guarded("/student/exams", student)
            .guarded("/teacher", RoleSet::only(Role::Teacher))
            .guarded("/admin", RoleSet::only(Role::Admin))
    }

    /// Declare a public route.
    pub fn public(mut self, path: &str) -> Self {
        self.routes.push(RouteEntry {
            path: RoutePath::new(path),
            allowed: None,
        });
        self
    }

    /// Declare a guarded route.
    pub fn guarded(mut self, path: &str, allowed: RoleSet) -> Self {
        self.routes.push(RouteEntry {
            path: RoutePath::new(path),
            allowed: Some(allowed),
        });
        self
    }

    /// Resolve a raw path.
    pub fn resolve(&self, raw: &str) -> RouteMatch {
        let path = RoutePath::new(raw);

        if let Some(entry) = self.routes.iter().find(|e| e.path == path) {
            return match entry.allowed {
                None => RouteMatch::Public(path),
                Some(allowed) => RouteMatch::Guarded { path, allowed },
            };
        }

        match path.first_segment().and_then(|s| s.parse::<Role>().ok()) {
            Some(role) => RouteMatch::Guarded {
                path,
                allowed: RoleSet::only(role),
            },
            None => RouteMatch::NotFound(path),
        }
    }

    /// Whether a path is reachable without a session.
    pub fn is_public(&self, raw: &str) -> bool {
        matches!(self.resolve(raw), RouteMatch::Public(_))
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::portal()
    }
}
