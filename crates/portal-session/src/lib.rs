//! # Portal Session
//!
//! Role-gated session core of the university portal.
//!
//! ## Components
//!
//! - **Session store** ([`SessionStore`]): who is signed in and with what
//!   role; restore, sign-in, sign-up, sign-out and refresh
//! - **Auth gateway** ([`AuthGateway`]): outbound port to the identity
//!   provider and the profile store
//! - **Guard** ([`guard`]): per-navigation allow / suspend / redirect
//!   decision, plus the portal route table
//! - **Bus** ([`bus`]): ordered notifications of every session transition
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   navigate   ┌────────────┐   session()   ┌──────────────┐
//! │ Host router  │ ───────────> │ RouteGuard │ ────────────> │ SessionStore │
//! └──────────────┘              └────────────┘               └──────┬───────┘
//!        ^                                                          │ AuthGateway
//!        │ SessionEvent                                             v
//!        └─────────────────────── SessionBus <───────────── identity provider
//! ```
//!
//! ## Guard decisions
//!
//! | Session | Role admitted | Decision |
//! |---------|---------------|----------|
//! | loading | any | `Suspend` |
//! | no identity | any | `Redirect(/login)` |
//! | identity | no | `Redirect(/<role>)` |
//! | identity | yes | `Allow` |

pub mod bus;
pub mod config;
pub mod domain;
pub mod guard;
pub mod ports;
pub mod service;

pub use bus::{SessionBus, SessionStream, SessionSubscription, SubscriptionError};
pub use config::SessionConfig;
pub use domain::*;
pub use guard::{
    authorize, authorize_with, GuardDecision, GuardState, RouteGuard, RouteMatch, RouteTable,
};
pub use ports::{AuthGateway, SessionApi};
pub use service::SessionStore;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::mocks::MockAuthGateway;
    use std::sync::Arc;

    const PASSWORD: &str = "secret123";

    // Guard and store together: the scenarios a user walks through.

    #[tokio::test]
    async fn test_unauthenticated_visit_redirects_to_login() {
        let store = SessionStore::new(Arc::new(MockAuthGateway::new()));
        store.initialize().await;

        let guard = RouteGuard::new(RoleSet::only(Role::Student));
        assert_eq!(guard.evaluate(&store), GuardDecision::Redirect(RoutePath::new("/login")));
    }

    #[tokio::test]
    async fn test_wrong_role_redirects_to_own_dashboard() {
        let tess = Identity::new(UserId::new(), "tess@uni.edu", "Tess", Role::Teacher);
        let store = SessionStore::new(Arc::new(MockAuthGateway::new().with_user(PASSWORD, tess)));
        store.initialize().await;
        store.sign_in("tess@uni.edu", PASSWORD).await.expect("sign in");

        let route = RouteTable::portal().resolve("/student/attendance");
        let guard = RouteGuard::for_route(&route, &store.config().login_route()).expect("guarded");
        assert_eq!(guard.evaluate(&store), GuardDecision::Redirect(RoutePath::new("/teacher")));
    }

    #[tokio::test]
    async fn test_guard_suspends_until_restored() {
        let sam = Identity::new(UserId::new(), "sam@uni.edu", "Sam", Role::Student);
        let gateway = MockAuthGateway::new()
            .with_user(PASSWORD, sam.clone())
            .with_stored_credential(sam.id);
        let store = SessionStore::new(Arc::new(gateway));
        let guard = RouteGuard::new(RoleSet::only(Role::Student));

        assert_eq!(guard.evaluate(&store), GuardDecision::Suspend);
        store.initialize().await;
        assert_eq!(guard.evaluate(&store), GuardDecision::Allow);
    }

    #[tokio::test]
    async fn test_sign_out_then_guard_redirects() {
        let adam = Identity::new(UserId::new(), "adam@uni.edu", "Adam", Role::Admin);
        let store = SessionStore::new(Arc::new(MockAuthGateway::new().with_user(PASSWORD, adam)));
        store.initialize().await;
        store.sign_in("adam@uni.edu", PASSWORD).await.expect("sign in");
        let guard = RouteGuard::new(RoleSet::only(Role::Admin));
        assert!(guard.evaluate(&store).is_allowed());

        store.sign_out().await;

        assert_eq!(guard.evaluate(&store), GuardDecision::Redirect(RoutePath::new("/login")));
    }
}
