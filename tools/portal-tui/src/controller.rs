//! Runs the side effects the app asks for.
//!
//! Gateway and record calls happen without holding the app lock; the lock is
//! taken only to write the outcome back.

use std::sync::Arc;

use portal_records::{FetchState, RecordsService};
use portal_session::{SessionApi, SessionError, SessionStore, Transition, UserId};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::domain::{Action, App, DataKind, Submission};

#[derive(Clone)]
pub struct Portal {
    store: Arc<SessionStore>,
    records: Arc<RecordsService>,
    app: Arc<Mutex<App>>,
}

impl Portal {
    pub fn new(store: Arc<SessionStore>, records: Arc<RecordsService>, app: App) -> Self {
        Self {
            store,
            records,
            app: Arc::new(Mutex::new(app)),
        }
    }

    pub fn app(&self) -> &Arc<Mutex<App>> {
        &self.app
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Restore a stored session in the background.
    pub fn spawn_restore(&self) -> JoinHandle<()> {
        let store = self.store.clone();
        tokio::spawn(async move {
            store.initialize().await;
        })
    }

    /// Surface session transitions the user did not trigger.
    pub fn spawn_session_watch(&self) -> JoinHandle<()> {
        let mut events = self.store.subscribe();
        let app = self.app.clone();
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                debug!(sequence = event.sequence, transition = %event.transition, "Session event");
                if event.transition == Transition::Invalidated {
                    app.lock().await.status =
                        Some("Your session has expired. Please sign in again.".to_string());
                }
            }
        })
    }

    /// Route against the live session; start any fetch the view needs.
    pub async fn tick(&self) {
        let action = self.app.lock().await.sync(&self.store);
        if let Some(action) = action {
            self.spawn(action);
        }
    }

    /// Run an action without blocking the draw loop.
    pub fn spawn(&self, action: Action) -> JoinHandle<()> {
        let portal = self.clone();
        tokio::spawn(async move { portal.dispatch(action).await })
    }

    pub async fn dispatch(&self, action: Action) {
        match action {
            Action::Submit(Submission::SignIn { email, password }) => {
                let outcome = self.store.sign_in(&email, &password).await;
                let mut app = self.app.lock().await;
                match outcome {
                    Ok(identity) => {
                        app.login.reset();
                        app.navigate(identity.home_path().as_str());
                    }
                    Err(SessionError::Superseded) => app.login.busy = false,
                    Err(e) => app.login.fail(e.to_string()),
                }
            }
            Action::Submit(Submission::SignUp {
                email,
                password,
                full_name,
                role,
            }) => {
                let outcome = self.store.sign_up(&email, &password, &full_name, role).await;
                let mut app = self.app.lock().await;
                match outcome {
                    Ok(()) => app.login.signed_up(),
                    Err(e) => app.login.fail(e.to_string()),
                }
            }
            Action::SignOut => {
                self.store.sign_out().await;
                let mut app = self.app.lock().await;
                let login = app.router.login_path().to_string();
                app.navigate(&login);
                app.status = Some("Signed out".to_string());
            }
            Action::Refresh => {
                self.store.refresh().await;
                let mut app = self.app.lock().await;
                let owner = app.data.owner;
                app.data = Default::default();
                app.data.owner = owner;
                app.last_refresh = Some(chrono::Utc::now());
            }
            Action::Load(kind) => self.load(kind).await,
        }
    }

    async fn load(&self, kind: DataKind) {
        let owner = self.store.session().user_id();
        match kind {
            DataKind::Attendance => {
                let state = FetchState::from_result(self.records.attendance().await);
                self.write_back(owner, |app| app.data.attendance = Some(state)).await;
            }
            DataKind::Exams => {
                let state = FetchState::from_result(self.records.exams().await);
                self.write_back(owner, |app| app.data.exams = Some(state)).await;
            }
            DataKind::Timetable => {
                let state = FetchState::from_result(self.records.timetable().await);
                self.write_back(owner, |app| app.data.timetable = Some(state)).await;
            }
        }
    }

    /// Store fetched data unless the signed-in user changed meanwhile.
    async fn write_back(&self, owner: Option<UserId>, apply: impl FnOnce(&mut App)) {
        let mut app = self.app.lock().await;
        if app.data.owner != owner {
            info!("Records arrived for a previous session, dropped");
            return;
        }
        apply(&mut *app);
        app.last_refresh = Some(chrono::Utc::now());
    }
}
