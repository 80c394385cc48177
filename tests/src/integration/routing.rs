//! # Routing
//!
//! The portal route table with guards evaluated over a live session store.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use portal_backend::InMemoryBackend;
    use portal_session::{
        GuardDecision, Role, RoleSet, RouteGuard, RouteMatch, RoutePath, RouteTable, SessionApi,
        SessionStore,
    };
    use proptest::prelude::*;

    use crate::fixtures::{Portal, PASSWORD};

    fn login() -> RoutePath {
        RoutePath::new("/login")
    }

    /// Route decision the way the host router takes it.
    fn decide(table: &RouteTable, store: &SessionStore, raw: &str) -> Option<GuardDecision> {
        RouteGuard::for_route(&table.resolve(raw), &login()).map(|guard| guard.evaluate(store))
    }

    async fn store_for(role: Option<Role>) -> Arc<SessionStore> {
        let portal = Portal::new(InMemoryBackend::new());
        portal.store.initialize().await;
        if let Some(role) = role {
            portal.user("u", role);
            portal.store.sign_in("u@uni.edu", PASSWORD).await.expect("sign in");
        }
        portal.store
    }

    #[test]
    fn test_portal_table() {
        let table = RouteTable::portal();

        for public in ["/", "/about", "/login", "/login/"] {
            assert!(table.is_public(public), "{} should be public", public);
        }
        assert_eq!(
            table.resolve("/student/notes"),
            RouteMatch::Guarded {
                path: RoutePath::new("/student/notes"),
                allowed: RoleSet::only(Role::Student),
            }
        );
        assert_eq!(
            table.resolve("/admin/users?page=2"),
            RouteMatch::Guarded {
                path: RoutePath::new("/admin/users"),
                allowed: RoleSet::only(Role::Admin),
            }
        );
        assert_eq!(
            table.resolve("/unknown"),
            RouteMatch::NotFound(RoutePath::new("/unknown"))
        );
    }

    #[tokio::test]
    async fn test_anonymous_visits() {
        let table = RouteTable::portal();
        let store = store_for(None).await;

        assert_eq!(decide(&table, &store, "/about"), None);
        assert_eq!(
            decide(&table, &store, "/student/attendance"),
            Some(GuardDecision::Redirect(login()))
        );
        assert_eq!(decide(&table, &store, "/nowhere"), None);
    }

    #[tokio::test]
    async fn test_each_role_is_confined_to_its_dashboard() {
        let table = RouteTable::portal();
        for role in Role::ALL {
            let store = store_for(Some(role)).await;
            for other in Role::ALL {
                let decision = decide(&table, &store, other.home_path().as_str());
                let expected = if other == role {
                    GuardDecision::Allow
                } else {
                    GuardDecision::Redirect(role.home_path())
                };
                assert_eq!(decision, Some(expected), "{} visiting {}", role, other);
            }
        }
    }

    #[tokio::test]
    async fn test_custom_login_path() {
        let table = RouteTable::portal();
        let store = store_for(None).await;
        let guard = RouteGuard::for_route(&table.resolve("/teacher"), &RoutePath::new("/signin"))
            .expect("guarded");
        assert_eq!(
            guard.evaluate(&store),
            GuardDecision::Redirect(RoutePath::new("/signin"))
        );
    }

    fn path_strategy() -> impl Strategy<Value = String> {
        let segment = prop_oneof![
            Just("student"),
            Just("teacher"),
            Just("admin"),
            Just("about"),
            Just("login"),
            Just("attendance"),
            Just("exams"),
            Just("x"),
        ];
        proptest::collection::vec(segment, 0..3).prop_map(|segments| format!("/{}", segments.join("/")))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_guarded_routes_follow_the_signed_in_role(
            path in path_strategy(),
            role in proptest::option::of(proptest::sample::select(Role::ALL.to_vec())),
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("runtime");
            let store = runtime.block_on(store_for(role));
            let table = RouteTable::portal();

            let first = decide(&table, &store, &path);
            prop_assert_eq!(&first, &decide(&table, &store, &path));

            if let RouteMatch::Guarded { allowed, .. } = table.resolve(&path) {
                let expected = match role {
                    None => GuardDecision::Redirect(login()),
                    Some(role) if allowed.permits(role) => GuardDecision::Allow,
                    Some(role) => GuardDecision::Redirect(role.home_path()),
                };
                prop_assert_eq!(first, Some(expected));
            } else {
                prop_assert_eq!(first, None);
            }
        }
    }
}
