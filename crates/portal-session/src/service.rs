//! Session Store
//!
//! Single source of truth for who is signed in and with what role.
//!
//! State lives behind a mutex. Every write and the notification reporting
//! it happen in one critical section, so subscribers see transitions in the
//! order they happened. No lock is held while a gateway call is pending.
//!
//! Sign-out and invalidation advance an epoch. A gateway call that resolves
//! after the epoch moved on is discarded.

use crate::bus::{SessionBus, SessionStream, SessionSubscription};
use crate::config::SessionConfig;
use crate::domain::entities::{Credentials, Identity, NewAccount, Session, SessionStatus};
use crate::domain::errors::{AuthError, SessionError};
use crate::domain::events::Transition;
use crate::domain::value_objects::{Role, UserId};
use crate::ports::inbound::SessionApi;
use crate::ports::outbound::AuthGateway;
use async_trait::async_trait;
use parking_lot::Mutex;
use portal_telemetry::{log_session_event, record_auth, record_transition};
use std::sync::Arc;
use tracing::{debug, info, warn};

struct StoreState {
    session: Session,
    /// Explicit transitions pending in the current epoch
    in_flight: usize,
    /// Bumped by sign-out and invalidation
    epoch: u64,
    /// Bumped by every write that settles the identity
    version: u64,
}

/// Where a pending operation started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Ticket {
    epoch: u64,
    version: u64,
}

/// Session store
///
/// Pass it by `Arc` to whatever needs the session.
pub struct SessionStore {
    gateway: Arc<dyn AuthGateway>,
    config: SessionConfig,
    state: Mutex<StoreState>,
    bus: SessionBus,
}

impl SessionStore {
    /// Create a store in the loading state. Call [`SessionApi::initialize`]
    /// once at startup.
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        Self::with_config(gateway, SessionConfig::default())
    }

    /// Create a store with custom config.
    pub fn with_config(gateway: Arc<dyn AuthGateway>, config: SessionConfig) -> Self {
        let bus = SessionBus::with_capacity(config.event_capacity);
        Self {
            gateway,
            config,
            state: Mutex::new(StoreState {
                session: Session::loading(),
                in_flight: 0,
                epoch: 0,
                version: 0,
            }),
            bus,
        }
    }

    /// Current snapshot.
    pub fn session(&self) -> Session {
        self.state.lock().session.clone()
    }

    /// Observe every transition from now on.
    pub fn subscribe(&self) -> SessionSubscription {
        self.bus.subscribe()
    }

    /// Observe every transition as a `Stream`.
    pub fn session_stream(&self) -> SessionStream {
        self.bus.stream()
    }

    /// Configuration in use.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Sequence number of the last published transition.
    pub fn last_sequence(&self) -> u64 {
        self.bus.last_sequence()
    }

    fn publish_locked(&self, state: &StoreState, transition: Transition) {
        record_transition(transition.label());
        let event = self.bus.publish(transition, state.session.clone());
        debug!(
            sequence = event.sequence,
            transition = %transition,
            status = ?state.session.status,
            "Session transition"
        );
    }

    fn status_for(in_flight: usize) -> SessionStatus {
        if in_flight == 0 {
            SessionStatus::Ready
        } else {
            SessionStatus::Loading
        }
    }

    /// Enter loading for an explicit transition.
    fn begin(&self, transition: Transition) -> Ticket {
        let mut state = self.state.lock();
        state.in_flight += 1;
        state.session.status = SessionStatus::Loading;
        self.publish_locked(&state, transition);
        Ticket {
            epoch: state.epoch,
            version: state.version,
        }
    }

    /// Enter loading for a sign-out. Earlier pending transitions become
    /// stale.
    fn begin_sign_out(&self) -> Ticket {
        let mut state = self.state.lock();
        state.epoch += 1;
        state.in_flight = 1;
        state.session.status = SessionStatus::Loading;
        self.publish_locked(&state, Transition::SignOutStarted);
        Ticket {
            epoch: state.epoch,
            version: state.version,
        }
    }

    /// Leave loading for a transition begun with `ticket`.
    ///
    /// Returns `None` without touching state when a sign-out or
    /// invalidation happened in between.
    fn settle(
        &self,
        ticket: Ticket,
        transition: Transition,
        apply: impl FnOnce(&mut StoreState),
    ) -> Option<Session> {
        let mut state = self.state.lock();
        if state.epoch != ticket.epoch {
            return None;
        }
        state.in_flight = state.in_flight.saturating_sub(1);
        apply(&mut state);
        state.session.status = Self::status_for(state.in_flight);
        self.publish_locked(&state, transition);
        Some(state.session.clone())
    }

    fn set_identity(state: &mut StoreState, identity: Option<Identity>) {
        state.session.identity = identity;
        state.version += 1;
    }

    /// Revoke the credential a discarded sign-in left with the gateway.
    ///
    /// Skipped when a later sign-in has already settled; the gateway keeps a
    /// single credential and it now belongs to that session.
    async fn revoke_discarded(&self, user_id: UserId) {
        if self.state.lock().session.identity.is_some() {
            debug!(user_id = %user_id, "Discarded credential already replaced");
            return;
        }
        let revoked = self.gateway.invalidate_credentials().await;
        record_auth("revoke_discarded", revoked.is_ok());
        match revoked {
            Ok(()) => info!(user_id = %user_id, "Discarded sign-in credential revoked"),
            Err(e) => warn!(user_id = %user_id, error = %e, "Failed to revoke discarded sign-in credential"),
        }
    }

    fn validate_credentials(&self, credentials: &Credentials) -> Result<(), AuthError> {
        if credentials.email.is_empty() || !credentials.email.contains('@') {
            return Err(AuthError::invalid_input("Please enter a valid email address"));
        }
        if credentials.password.is_empty() {
            return Err(AuthError::invalid_input("Password is required"));
        }
        Ok(())
    }

    fn validate_account(&self, account: &NewAccount) -> Result<(), AuthError> {
        self.validate_credentials(&account.credentials)?;
        if account.credentials.password.chars().count() < self.config.min_password_len {
            return Err(AuthError::InvalidInput(format!(
                "Password must be at least {} characters",
                self.config.min_password_len
            )));
        }
        if account.full_name.is_empty() {
            return Err(AuthError::invalid_input("Full name is required"));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionApi for SessionStore {
    async fn initialize(&self) -> Session {
        let ticket = self.begin(Transition::RestoreStarted);
        let timeout = self.config.restore_timeout();

        let restored =
            match tokio::time::timeout(timeout, self.gateway.resolve_current_identity()).await {
                Ok(identity) => identity,
                Err(_) => {
                    warn!(timeout_ms = self.config.restore_timeout_ms, "Session restore timed out");
                    None
                }
            };

        let settled = self.settle(ticket, Transition::Restored, |state| {
            // A sign-in that settled meanwhile wins over the stored credential
            if state.version == ticket.version {
                Self::set_identity(state, restored.clone());
            }
        });

        match &restored {
            Some(identity) => {
                log_session_event!(info, "Session restored", identity.id, role = %identity.role)
            }
            None => debug!("No session to restore"),
        }

        settled.unwrap_or_else(|| self.session())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, SessionError> {
        let credentials = Credentials::new(email, password);
        self.validate_credentials(&credentials)?;

        let ticket = self.begin(Transition::SignInStarted);

        let submitted = self.gateway.submit_credentials(&credentials).await;
        record_auth("sign_in", submitted.is_ok());

        let user = match submitted {
            Ok(user) => user,
            Err(e) => {
                info!(email = %credentials.email, error = %e, "Sign-in rejected");
                self.settle(ticket, Transition::SignInFailed, |_| {})
                    .ok_or(SessionError::Superseded)?;
                return Err(e.into());
            }
        };

        let resolved = self
            .gateway
            .resolve_current_identity()
            .await
            .filter(|identity| identity.id == user.id);

        match resolved {
            Some(identity) => {
                let settled = self.settle(ticket, Transition::SignedIn, |state| {
                    Self::set_identity(state, Some(identity.clone()))
                });
                if settled.is_none() {
                    debug!(user_id = %user.id, "Sign-in resolved after sign-out, discarded");
                    self.revoke_discarded(user.id).await;
                    return Err(SessionError::Superseded);
                }
                log_session_event!(info, "Session established", identity.id, role = %identity.role);
                Ok(identity)
            }
            None => {
                warn!(user_id = %user.id, "Authenticated without a usable profile");
                let settled = self.settle(ticket, Transition::SignInFailed, |state| {
                    Self::set_identity(state, None)
                });
                if settled.is_none() {
                    self.revoke_discarded(user.id).await;
                    return Err(SessionError::Superseded);
                }
                Err(AuthError::ProfileMissing.into())
            }
        }
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        role: Role,
    ) -> Result<(), AuthError> {
        let account = NewAccount::new(Credentials::new(email, password), full_name, role);
        self.validate_account(&account)?;

        let created = self.gateway.create_account(&account).await;
        record_auth("sign_up", created.is_ok());

        match &created {
            Ok(()) => info!(email = %account.credentials.email, role = %role, "Account created"),
            Err(e) => info!(email = %account.credentials.email, error = %e, "Sign-up rejected"),
        }
        created
    }

    async fn sign_out(&self) -> Session {
        let previous = self.session().user_id();
        let ticket = self.begin_sign_out();

        let invalidated = self.gateway.invalidate_credentials().await;
        record_auth("sign_out", invalidated.is_ok());
        if let Err(e) = &invalidated {
            warn!(error = %e, "Remote sign-out failed, clearing local session anyway");
        }

        let settled = self.settle(ticket, Transition::SignedOut, |state| {
            Self::set_identity(state, None)
        });

        if let Some(id) = previous {
            log_session_event!(info, "Session ended", id);
        }

        settled.unwrap_or_else(|| self.session())
    }

    async fn refresh(&self) -> Session {
        let (current, ticket) = {
            let state = self.state.lock();
            let Some(identity) = state.session.identity.clone() else {
                return state.session.clone();
            };
            if state.in_flight > 0 {
                return state.session.clone();
            }
            let ticket = Ticket {
                epoch: state.epoch,
                version: state.version,
            };
            (identity, ticket)
        };

        let resolved = self.gateway.resolve_current_identity().await;

        let mut state = self.state.lock();
        if state.epoch != ticket.epoch || state.version != ticket.version || state.in_flight > 0 {
            debug!(user_id = %current.id, "Refresh overtaken by another transition");
            return state.session.clone();
        }

        match resolved {
            Some(fresh) if fresh.id == current.id && fresh.role == current.role => {
                if fresh != current {
                    Self::set_identity(&mut state, Some(fresh));
                }
                self.publish_locked(&state, Transition::Refreshed);
            }
            other => {
                match other {
                    Some(fresh) if fresh.id == current.id => warn!(
                        user_id = %current.id,
                        from = %current.role,
                        to = %fresh.role,
                        "Role changed, session invalidated"
                    ),
                    _ => warn!(user_id = %current.id, "Credential no longer valid, session invalidated"),
                }
                state.epoch += 1;
                state.in_flight = 0;
                state.session.status = SessionStatus::Ready;
                Self::set_identity(&mut state, None);
                self.publish_locked(&state, Transition::Invalidated);
            }
        }

        state.session.clone()
    }

    fn session(&self) -> Session {
        SessionStore::session(self)
    }

    fn subscribe(&self) -> SessionSubscription {
        SessionStore::subscribe(self)
    }
}
