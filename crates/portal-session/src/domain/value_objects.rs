//! Value objects for the session core

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identity provider credential id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Portal role. Determines which views are authorized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrator
    Admin,
    /// Teaching staff
    Teacher,
    /// Enrolled student; preselected at sign-up
    #[default]
    Student,
}

/// Role string was not one of `admin`, `teacher`, `student`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl Role {
    /// Every role, in sign-up picker order.
    pub const ALL: [Role; 3] = [Role::Student, Role::Teacher, Role::Admin];

    /// Lower-case name as stored in `profiles.role`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    /// Capitalized name for display.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Teacher => "Teacher",
            Role::Student => "Student",
        }
    }

    /// Dashboard root for this role.
    pub fn home_path(&self) -> RoutePath {
        RoutePath(format!("/{}", self.as_str()))
    }

    fn bit(self) -> u8 {
        match self {
            Role::Admin => 0b001,
            Role::Teacher => 0b010,
            Role::Student => 0b100,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    /// Case-sensitive, matching the stored profile values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Roles a guarded view admits. Empty admits any authenticated role.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RoleSet(u8);

impl RoleSet {
    /// Any authenticated user.
    pub const fn any() -> Self {
        Self(0)
    }

    /// Exactly one role.
    pub fn only(role: Role) -> Self {
        Self(role.bit())
    }

    /// Add a role.
    pub fn with(self, role: Role) -> Self {
        Self(self.0 | role.bit())
    }

    /// Whether no role restriction applies.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether the set names `role` explicitly.
    pub fn contains(&self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    /// Whether a user with `role` passes this set.
    pub fn permits(&self, role: Role) -> bool {
        self.is_empty() || self.contains(role)
    }

    /// Named roles, in `Role::ALL` order.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|r| self.contains(*r))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter().fold(RoleSet::any(), RoleSet::with)
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        RoleSet::only(role)
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("any");
        }
        let names: Vec<&str> = self.roles().map(|r| r.as_str()).collect();
        f.write_str(&names.join("|"))
    }
}

/// Normalized in-app path: leading `/`, no trailing `/`, no query or fragment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutePath(String);

impl RoutePath {
    /// Normalize any user-supplied path.
    ///
    /// `.` segments are dropped and `..` removes the segment before it, as a
    /// browser resolves them; `..` at the root stays at the root.
    pub fn new(raw: &str) -> Self {
        let raw = raw.split(['?', '#']).next().unwrap_or("").trim();
        let mut segments: Vec<&str> = Vec::new();
        for segment in raw.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                other => segments.push(other),
            }
        }
        Self(format!("/{}", segments.join("/")))
    }

    /// The root path `/`.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// First segment, if any.
    pub fn first_segment(&self) -> Option<&str> {
        self.segments().next()
    }
}

impl Default for RoutePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoutePath {
    fn from(raw: &str) -> Self {
        RoutePath::new(raw)
    }
}

impl PartialEq<str> for RoutePath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RoutePath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_sensitive() {
        assert_eq!("teacher".parse::<Role>(), Ok(Role::Teacher));
        assert!("Teacher".parse::<Role>().is_err());
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_lowercase() {
        let json = serde_json::to_string(&Role::Admin).expect("serialize");
        assert_eq!(json, "\"admin\"");
        let role: Role = serde_json::from_str("\"student\"").expect("deserialize");
        assert_eq!(role, Role::Student);
    }

    #[test]
    fn test_home_path() {
        assert_eq!(Role::Teacher.home_path(), "/teacher");
        assert_eq!(Role::Admin.label(), "Admin");
    }

    #[test]
    fn test_role_set_permits() {
        let any = RoleSet::any();
        assert!(Role::ALL.iter().all(|r| any.permits(*r)));

        let staff: RoleSet = [Role::Teacher, Role::Admin].into_iter().collect();
        assert!(staff.permits(Role::Admin));
        assert!(!staff.permits(Role::Student));
        assert_eq!(staff.to_string(), "teacher|admin");
    }

    #[test]
    fn test_route_path_normalization() {
        assert_eq!(RoutePath::new("student/"), "/student");
        assert_eq!(RoutePath::new("//student//exams/?tab=1"), "/student/exams");
        assert_eq!(RoutePath::new(""), "/");
        assert_eq!(RoutePath::new("/#top"), "/");
        assert_eq!(RoutePath::new("/admin/users").first_segment(), Some("admin"));
    }

    #[test]
    fn test_route_path_resolves_dot_segments() {
        assert_eq!(RoutePath::new("/student/../admin"), "/admin");
        assert_eq!(RoutePath::new("/student/./exams"), "/student/exams");
        assert_eq!(RoutePath::new("/../../teacher"), "/teacher");
        assert_eq!(RoutePath::new("/student/exams/../.."), "/");
    }

    #[test]
    fn test_user_id_roundtrip_display() {
        let id = UserId::new();
        let parsed: UserId = id.to_string().parse().expect("parse");
        assert_eq!(id, parsed);
    }
}
