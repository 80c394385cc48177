//! In-memory backend.
//!
//! Implements both ports against process-local tables. Used by the test
//! suites and by the terminal shell's demo mode. Passwords are stored as
//! salted SHA-256 digests.

mod seed;

pub use seed::{DemoAccount, DEMO_ACCOUNTS, DEMO_PASSWORD};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use portal_records::{
    AttendanceRecord, Enrollment, Exam, ExamResult, LectureSchedule, RecordSource, RecordsError,
};
use portal_session::{
    resolve_identity, AuthError, AuthGateway, Credentials, Identity, NewAccount, ProfileRow,
    ProviderUser, Role, UserId,
};
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

struct Account {
    id: UserId,
    salt: String,
    digest: String,
    confirmed: bool,
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn new_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Default)]
struct Tables {
    attendance: HashMap<UserId, Vec<AttendanceRecord>>,
    results: HashMap<UserId, Vec<ExamResult>>,
    exams: Vec<Exam>,
    enrollments: HashMap<UserId, Vec<Enrollment>>,
    lectures: Vec<LectureSchedule>,
}

/// Backend held entirely in memory.
#[derive(Default)]
pub struct InMemoryBackend {
    accounts: RwLock<HashMap<String, Account>>,
    profiles: RwLock<HashMap<UserId, ProfileRow>>,
    current: Mutex<Option<UserId>>,
    tables: RwLock<Tables>,
    latency: Option<Duration>,
    require_confirmation: bool,
    fail_logout: AtomicBool,
    schedule_queries: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call, to make loading states visible.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// New accounts must be confirmed before they can sign in.
    pub fn requiring_confirmation(mut self) -> Self {
        self.require_confirmation = true;
        self
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    /// Register a confirmed account with its profile.
    pub fn add_user(&self, email: &str, password: &str, full_name: &str, role: Role) -> Identity {
        let identity = Identity::new(UserId::new(), email.trim(), full_name, role);
        let salt = new_salt();
        self.accounts.write().insert(
            email_key(email),
            Account {
                id: identity.id,
                digest: digest(&salt, password),
                salt,
                confirmed: true,
            },
        );
        self.profiles.write().insert(identity.id, ProfileRow::from(&identity));
        identity
    }

    /// Mark an account's email as confirmed.
    pub fn confirm_email(&self, email: &str) -> bool {
        match self.accounts.write().get_mut(&email_key(email)) {
            Some(account) => {
                account.confirmed = true;
                true
            }
            None => false,
        }
    }

    /// Overwrite the role column of a profile row.
    pub fn set_profile_role(&self, id: UserId, role: &str) {
        if let Some(row) = self.profiles.write().get_mut(&id) {
            row.role = role.to_string();
        }
    }

    /// Overwrite the display name of a profile row.
    pub fn set_profile_name(&self, id: UserId, full_name: &str) {
        if let Some(row) = self.profiles.write().get_mut(&id) {
            row.full_name = full_name.to_string();
        }
    }

    /// Delete a profile row, leaving the account.
    pub fn remove_profile(&self, id: UserId) {
        self.profiles.write().remove(&id);
    }

    /// Forget the signed-in credential, as if it expired.
    pub fn expire_session(&self) {
        *self.current.lock() = None;
    }

    /// Make logout requests fail with a network error.
    pub fn set_fail_logout(&self, fail: bool) {
        self.fail_logout.store(fail, Ordering::SeqCst);
    }

    /// User the stored credential belongs to.
    pub fn current_user(&self) -> Option<UserId> {
        *self.current.lock()
    }

    /// Number of `lecture_schedules` queries served.
    pub fn schedule_queries(&self) -> usize {
        self.schedule_queries.load(Ordering::SeqCst)
    }

    pub fn insert_attendance(&self, student: UserId, record: AttendanceRecord) {
        self.tables.write().attendance.entry(student).or_default().push(record);
    }

    pub fn insert_result(&self, student: UserId, result: ExamResult) {
        self.tables.write().results.entry(student).or_default().push(result);
    }

    pub fn insert_exam(&self, exam: Exam) {
        self.tables.write().exams.push(exam);
    }

    pub fn enroll(&self, student: UserId, batch_id: Uuid) {
        self.tables
            .write()
            .enrollments
            .entry(student)
            .or_default()
            .push(Enrollment { batch_id });
    }

    pub fn insert_lecture(&self, lecture: LectureSchedule) {
        self.tables.write().lectures.push(lecture);
    }

    fn require_session(&self) -> Result<UserId, RecordsError> {
        self.current_user().ok_or(RecordsError::Unauthenticated)
    }
}

#[async_trait]
impl AuthGateway for InMemoryBackend {
    async fn submit_credentials(&self, credentials: &Credentials) -> Result<ProviderUser, AuthError> {
        self.delay().await;

        let id = {
            let accounts = self.accounts.read();
            let account = accounts
                .get(&email_key(&credentials.email))
                .filter(|a| a.digest == digest(&a.salt, &credentials.password))
                .ok_or(AuthError::InvalidCredentials)?;
            if !account.confirmed {
                return Err(AuthError::EmailNotConfirmed);
            }
            account.id
        };

        *self.current.lock() = Some(id);
        debug!(user_id = %id, "In-memory sign-in");
        Ok(ProviderUser {
            id,
            email: Some(credentials.email.clone()),
        })
    }

    async fn create_account(&self, account: &NewAccount) -> Result<(), AuthError> {
        self.delay().await;

        let key = email_key(&account.credentials.email);
        let mut accounts = self.accounts.write();
        if accounts.contains_key(&key) {
            return Err(AuthError::AccountExists);
        }

        let identity = Identity::new(
            UserId::new(),
            account.credentials.email.clone(),
            account.full_name.clone(),
            account.role,
        );
        let salt = new_salt();
        accounts.insert(
            key,
            Account {
                id: identity.id,
                digest: digest(&salt, &account.credentials.password),
                salt,
                confirmed: !self.require_confirmation,
            },
        );
        self.profiles.write().insert(identity.id, ProfileRow::from(&identity));
        debug!(user_id = %identity.id, role = %identity.role, "In-memory account created");
        Ok(())
    }

    async fn invalidate_credentials(&self) -> Result<(), AuthError> {
        self.delay().await;
        self.current.lock().take();
        if self.fail_logout.load(Ordering::SeqCst) {
            return Err(AuthError::Network("logout request failed".to_string()));
        }
        Ok(())
    }

    async fn resolve_current_identity(&self) -> Option<Identity> {
        self.delay().await;
        let id = self.current_user()?;
        let profile = self.profiles.read().get(&id).cloned();
        resolve_identity(
            Some(ProviderUser { id, email: None }),
            Ok::<_, Infallible>(profile),
        )
    }
}

#[async_trait]
impl RecordSource for InMemoryBackend {
    async fn attendance(&self, student: UserId) -> Result<Vec<AttendanceRecord>, RecordsError> {
        self.delay().await;
        self.require_session()?;
        let mut rows = self.tables.read().attendance.get(&student).cloned().unwrap_or_default();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    async fn results(&self, student: UserId) -> Result<Vec<ExamResult>, RecordsError> {
        self.delay().await;
        self.require_session()?;
        let mut rows = self.tables.read().results.get(&student).cloned().unwrap_or_default();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn upcoming_exams(&self, from: DateTime<Utc>) -> Result<Vec<Exam>, RecordsError> {
        self.delay().await;
        self.require_session()?;
        let mut rows: Vec<Exam> = self
            .tables
            .read()
            .exams
            .iter()
            .filter(|e| e.exam_date >= from)
            .cloned()
            .collect();
        rows.sort_by_key(|e| e.exam_date);
        Ok(rows)
    }

    async fn enrollments(&self, student: UserId) -> Result<Vec<Enrollment>, RecordsError> {
        self.delay().await;
        self.require_session()?;
        Ok(self.tables.read().enrollments.get(&student).cloned().unwrap_or_default())
    }

    async fn lecture_schedules(&self, batches: &[Uuid]) -> Result<Vec<LectureSchedule>, RecordsError> {
        self.delay().await;
        self.require_session()?;
        self.schedule_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .tables
            .read()
            .lectures
            .iter()
            .filter(|l| batches.contains(&l.batch_id))
            .cloned()
            .collect())
    }
}
