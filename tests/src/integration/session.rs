//! # Session Scenarios
//!
//! Session store, auth gateway and guard together, over the in-memory
//! backend:
//!
//! 1. **Unauthenticated visit** redirects to the login page
//! 2. **Sign-in** publishes the profile's role; other roles' views redirect home
//! 3. **Sign-out** clears the identity; guarded views redirect to login
//! 4. **Sign-up** never signs in
//!
//! Plus role immutability, fail-closed profile resolution, the loading
//! suspension, ordering across subscribers, late resolutions and the restore
//! timeout.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use portal_backend::InMemoryBackend;
    use portal_session::domain::invariants::{invariant_role_immutable, invariant_settled_identity};
    use portal_session::{
        AuthError, AuthGateway, Credentials, GuardDecision, Identity, NewAccount, ProviderUser,
        Role, RoleSet, RouteGuard, RoutePath, SessionApi, SessionError, SessionStatus,
        SessionStore, Transition,
    };
    use tokio::sync::Notify;

    use crate::fixtures::{fast_config, Portal, PASSWORD};

    fn guard(role: Role) -> RouteGuard {
        RouteGuard::new(RoleSet::only(role))
    }

    fn redirect(path: &str) -> GuardDecision {
        GuardDecision::Redirect(RoutePath::new(path))
    }

    // =========================================================================
    // SCENARIOS
    // =========================================================================

    #[tokio::test]
    async fn test_unauthenticated_user_is_sent_to_login() {
        let portal = Portal::new(InMemoryBackend::new());
        portal.store.initialize().await;

        assert_eq!(guard(Role::Student).evaluate(&portal.store), redirect("/login"));
    }

    #[tokio::test]
    async fn test_student_sign_in_allows_student_views_only() {
        let portal = Portal::new(InMemoryBackend::new());
        portal.user("sam", Role::Student);
        portal.store.initialize().await;

        let identity = portal
            .store
            .sign_in("sam@uni.edu", PASSWORD)
            .await
            .expect("sign in");
        assert_eq!(identity.role, Role::Student);
        assert_eq!(portal.store.session().role(), Some(Role::Student));

        assert_eq!(guard(Role::Student).evaluate(&portal.store), GuardDecision::Allow);
        assert_eq!(guard(Role::Admin).evaluate(&portal.store), redirect("/student"));
    }

    #[tokio::test]
    async fn test_admin_sign_out_sends_every_guarded_view_to_login() {
        let portal = Portal::new(InMemoryBackend::new());
        portal.user("alex", Role::Admin);
        portal.store.initialize().await;
        portal.store.sign_in("alex@uni.edu", PASSWORD).await.expect("sign in");

        let session = portal.store.sign_out().await;
        assert_eq!(session.identity, None);
        assert_eq!(session.status, SessionStatus::Ready);
        for role in Role::ALL {
            assert_eq!(guard(role).evaluate(&portal.store), redirect("/login"));
        }
    }

    #[tokio::test]
    async fn test_sign_up_leaves_session_empty_until_sign_in() {
        let portal = Portal::new(InMemoryBackend::new());
        portal.store.initialize().await;
        let mut events = portal.store.subscribe();

        portal
            .store
            .sign_up("new@uni.edu", PASSWORD, "New Teacher", Role::Teacher)
            .await
            .expect("sign up");
        assert_eq!(portal.store.session().identity, None);
        assert!(events.drain().is_empty());

        let identity = portal
            .store
            .sign_in("new@uni.edu", PASSWORD)
            .await
            .expect("sign in");
        assert_eq!(identity.role, Role::Teacher);
        assert_eq!(identity.full_name, "New Teacher");
    }

    #[tokio::test]
    async fn test_sign_up_with_unconfirmed_email() {
        let portal = Portal::new(InMemoryBackend::new().requiring_confirmation());
        portal.store.initialize().await;
        portal
            .store
            .sign_up("new@uni.edu", PASSWORD, "New", Role::Student)
            .await
            .expect("sign up");

        let err = portal
            .store
            .sign_in("new@uni.edu", PASSWORD)
            .await
            .unwrap_err();
        assert_eq!(err, SessionError::Auth(AuthError::EmailNotConfirmed));

        portal.backend.confirm_email("new@uni.edu");
        portal.store.sign_in("new@uni.edu", PASSWORD).await.expect("sign in");
    }

    #[tokio::test]
    async fn test_duplicate_sign_up_surfaces_provider_message() {
        let portal = Portal::new(InMemoryBackend::new());
        portal.user("sam", Role::Student);

        let err = portal
            .store
            .sign_up("sam@uni.edu", PASSWORD, "Sam", Role::Student)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User already registered");
    }

    // =========================================================================
    // PROPERTIES
    // =========================================================================

    #[tokio::test]
    async fn test_role_change_needs_a_new_sign_in() {
        let portal = Portal::new(InMemoryBackend::new());
        let sam = portal.user("sam", Role::Student);
        portal.store.initialize().await;
        let mut events = portal.store.subscribe();
        portal.store.sign_in("sam@uni.edu", PASSWORD).await.expect("sign in");

        portal.backend.set_profile_role(sam.id, "teacher");
        let session = portal.store.refresh().await;
        assert_eq!(session.identity, None);

        // No event ever shows the same id under a second role
        let drained = events.drain();
        assert!(drained.iter().all(|e| invariant_settled_identity(&e.session)));
        assert!(drained
            .windows(2)
            .all(|w| invariant_role_immutable(&w[0].session, &w[1].session)));
        let roles: Vec<Role> = drained
            .iter()
            .filter_map(|e| e.session.identity.as_ref())
            .filter(|i| i.id == sam.id)
            .map(|i| i.role)
            .collect();
        assert!(roles.iter().all(|r| *r == Role::Student), "roles {:?}", roles);

        let identity = portal
            .store
            .sign_in("sam@uni.edu", PASSWORD)
            .await
            .expect("sign in again");
        assert_eq!(identity.role, Role::Teacher);
    }

    #[tokio::test]
    async fn test_display_name_change_refreshes_in_place() {
        let portal = Portal::new(InMemoryBackend::new());
        let sam = portal.user("sam", Role::Student);
        portal.store.initialize().await;
        portal.store.sign_in("sam@uni.edu", PASSWORD).await.expect("sign in");

        portal.backend.set_profile_name(sam.id, "Samantha");
        let session = portal.store.refresh().await;
        assert_eq!(
            session.identity.map(|i| i.full_name),
            Some("Samantha".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_profile_fails_closed() {
        let portal = Portal::new(InMemoryBackend::new());
        let sam = portal.user("sam", Role::Student);
        portal.backend.remove_profile(sam.id);
        portal.store.initialize().await;

        let err = portal
            .store
            .sign_in("sam@uni.edu", PASSWORD)
            .await
            .unwrap_err();
        assert_eq!(err, SessionError::Auth(AuthError::ProfileMissing));

        let session = portal.store.session();
        assert_eq!(session.identity, None);
        assert_eq!(session.status, SessionStatus::Ready);
    }

    #[tokio::test]
    async fn test_unknown_profile_role_fails_closed_on_restore() {
        let backend = InMemoryBackend::new();
        let sam = backend.add_user("sam@uni.edu", PASSWORD, "Sam", Role::Student);
        let portal = Portal::new(backend);
        portal.store.initialize().await;
        portal.store.sign_in("sam@uni.edu", PASSWORD).await.expect("sign in");

        // A second process restoring the same credential
        portal.backend.set_profile_role(sam.id, "registrar");
        let restarted = portal_session::SessionStore::new(portal.backend.clone());
        let session = restarted.initialize().await;
        assert_eq!(session.identity, None);
        assert_eq!(session.status, SessionStatus::Ready);
    }

    #[tokio::test]
    async fn test_guard_is_repeatable_on_a_live_store() {
        let portal = Portal::new(InMemoryBackend::new());
        portal.user("tess", Role::Teacher);
        portal.store.initialize().await;
        portal.store.sign_in("tess@uni.edu", PASSWORD).await.expect("sign in");

        for role in Role::ALL {
            let g = guard(role);
            assert_eq!(g.evaluate(&portal.store), g.evaluate(&portal.store));
        }
    }

    #[tokio::test]
    async fn test_loading_only_ever_suspends() {
        let portal = Portal::new(InMemoryBackend::new().with_latency(Duration::from_millis(200)));
        portal.user("sam", Role::Student);

        // Before restoration
        for role in Role::ALL {
            assert_eq!(guard(role).evaluate(&portal.store), GuardDecision::Suspend);
        }
        portal.store.initialize().await;

        // During a sign-in
        let store = portal.store.clone();
        let signing_in = tokio::spawn(async move { store.sign_in("sam@uni.edu", PASSWORD).await });
        tokio::time::sleep(Duration::from_millis(50)).await;
        for role in Role::ALL {
            assert_eq!(guard(role).evaluate(&portal.store), GuardDecision::Suspend);
        }

        signing_in.await.expect("join").expect("sign in");
        assert_eq!(guard(Role::Student).evaluate(&portal.store), GuardDecision::Allow);
    }

    #[tokio::test]
    async fn test_teacher_on_admin_view_goes_to_own_dashboard() {
        let portal = Portal::new(InMemoryBackend::new());
        portal.user("tess", Role::Teacher);
        portal.store.initialize().await;
        portal.store.sign_in("tess@uni.edu", PASSWORD).await.expect("sign in");

        assert_eq!(guard(Role::Admin).evaluate(&portal.store), redirect("/teacher"));
    }

    #[tokio::test]
    async fn test_subscribers_agree_on_order() {
        let portal = Portal::new(InMemoryBackend::new());
        portal.user("sam", Role::Student);
        let mut first = portal.store.subscribe();
        let mut second = portal.store.subscribe();

        portal.store.initialize().await;
        portal.store.sign_in("sam@uni.edu", "wrong").await.unwrap_err();
        portal.store.sign_in("sam@uni.edu", PASSWORD).await.expect("sign in");
        portal.store.refresh().await;
        portal.store.sign_out().await;

        let a = first.drain();
        let b = second.drain();
        assert_eq!(a, b);
        assert!(a.windows(2).all(|w| w[1].sequence == w[0].sequence + 1));
        let transitions: Vec<Transition> = a.iter().map(|e| e.transition).collect();
        assert_eq!(
            transitions,
            vec![
                Transition::RestoreStarted,
                Transition::Restored,
                Transition::SignInStarted,
                Transition::SignInFailed,
                Transition::SignInStarted,
                Transition::SignedIn,
                Transition::Refreshed,
                Transition::SignOutStarted,
                Transition::SignedOut,
            ]
        );
    }

    #[tokio::test]
    async fn test_sign_in_overtaken_by_sign_out_is_discarded() {
        let portal = Portal::new(InMemoryBackend::new().with_latency(Duration::from_millis(100)));
        portal.user("sam", Role::Student);
        portal.store.initialize().await;
        let mut events = portal.store.subscribe();

        let store = portal.store.clone();
        let signing_in = tokio::spawn(async move { store.sign_in("sam@uni.edu", PASSWORD).await });
        tokio::time::sleep(Duration::from_millis(30)).await;
        portal.store.sign_out().await;

        let outcome = signing_in.await.expect("join");
        assert_eq!(outcome, Err(SessionError::Superseded));
        assert_eq!(portal.store.session().identity, None);
        assert!(events
            .drain()
            .iter()
            .all(|e| e.transition != Transition::SignedIn));
    }

    /// Holds every credential submission until released.
    struct GatedGateway {
        inner: Arc<InMemoryBackend>,
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl AuthGateway for GatedGateway {
        async fn submit_credentials(&self, credentials: &Credentials) -> Result<ProviderUser, AuthError> {
            self.entered.notify_one();
            self.release.notified().await;
            self.inner.submit_credentials(credentials).await
        }

        async fn create_account(&self, account: &NewAccount) -> Result<(), AuthError> {
            self.inner.create_account(account).await
        }

        async fn invalidate_credentials(&self) -> Result<(), AuthError> {
            self.inner.invalidate_credentials().await
        }

        async fn resolve_current_identity(&self) -> Option<Identity> {
            self.inner.resolve_current_identity().await
        }
    }

    #[tokio::test]
    async fn test_discarded_sign_in_leaves_no_credential() {
        let backend = Arc::new(InMemoryBackend::new());
        backend.add_user("sam@uni.edu", PASSWORD, "sam", Role::Student);
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let gateway = GatedGateway {
            inner: backend.clone(),
            entered: entered.clone(),
            release: release.clone(),
        };
        let store = Arc::new(SessionStore::with_config(Arc::new(gateway), fast_config()));
        store.initialize().await;

        let signing_in = {
            let store = store.clone();
            tokio::spawn(async move { store.sign_in("sam@uni.edu", PASSWORD).await })
        };
        entered.notified().await;
        assert_eq!(store.sign_out().await.identity, None);
        release.notify_one();

        assert_eq!(signing_in.await.expect("join"), Err(SessionError::Superseded));
        assert_eq!(store.session().identity, None);
        assert_eq!(backend.current_user(), None);

        let restarted = SessionStore::with_config(backend.clone(), fast_config());
        assert_eq!(restarted.initialize().await.identity, None);
    }

    #[tokio::test]
    async fn test_hung_restore_settles_anonymous() {
        let backend = InMemoryBackend::new().with_latency(Duration::from_secs(30));
        let portal = Portal::with_config(backend, fast_config());

        let session = tokio::time::timeout(Duration::from_secs(5), portal.store.initialize())
            .await
            .expect("initialize returns after the restore timeout");
        assert_eq!(session.identity, None);
        assert_eq!(session.status, SessionStatus::Ready);
    }

    #[tokio::test]
    async fn test_failed_remote_sign_out_still_clears() {
        let portal = Portal::new(InMemoryBackend::new());
        portal.user("sam", Role::Student);
        portal.store.initialize().await;
        portal.store.sign_in("sam@uni.edu", PASSWORD).await.expect("sign in");
        portal.backend.set_fail_logout(true);

        let session = portal.store.sign_out().await;
        assert_eq!(session.identity, None);
        assert_eq!(portal.backend.current_user(), None);
    }

    #[tokio::test]
    async fn test_flows_are_counted() {
        use portal_telemetry::metrics::{AUTH_REQUESTS, SESSION_TRANSITIONS};

        let signed_in = || SESSION_TRANSITIONS.with_label_values(&["signed_in"]).get();
        let rejected = || AUTH_REQUESTS.with_label_values(&["sign_in", "error"]).get();
        let (signed_in_before, rejected_before) = (signed_in(), rejected());

        let portal = Portal::new(InMemoryBackend::new());
        portal.user("sam", Role::Student);
        portal.store.initialize().await;
        portal.store.sign_in("sam@uni.edu", "wrong").await.unwrap_err();
        portal.store.sign_in("sam@uni.edu", PASSWORD).await.expect("sign in");

        assert!(signed_in() > signed_in_before);
        assert!(rejected() > rejected_before);
        assert!(portal_telemetry::encode_metrics().is_ok());
    }

    #[tokio::test]
    async fn test_session_restored_on_restart() {
        let portal = Portal::new(InMemoryBackend::new());
        let sam = portal.user("sam", Role::Student);
        portal.store.initialize().await;
        portal.store.sign_in("sam@uni.edu", PASSWORD).await.expect("sign in");

        let restarted = Arc::new(portal_session::SessionStore::new(portal.backend.clone()));
        let session = restarted.initialize().await;
        assert_eq!(session.user_id(), Some(sam.id));
    }
}
