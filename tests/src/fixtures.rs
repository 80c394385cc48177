//! Shared wiring for the scenarios.

use std::sync::Arc;
use std::time::Duration;

use portal_backend::InMemoryBackend;
use portal_records::RecordsService;
use portal_session::{Identity, Role, SessionConfig, SessionStore};

pub const PASSWORD: &str = "secret123";

/// A backend, a store over it and the records service.
pub struct Portal {
    pub backend: Arc<InMemoryBackend>,
    pub store: Arc<SessionStore>,
    pub records: RecordsService,
}

impl Portal {
    pub fn new(backend: InMemoryBackend) -> Self {
        Self::with_config(backend, SessionConfig::default())
    }

    pub fn with_config(backend: InMemoryBackend, config: SessionConfig) -> Self {
        let backend = Arc::new(backend);
        let store = Arc::new(SessionStore::with_config(backend.clone(), config));
        let records = RecordsService::new(backend.clone(), store.clone());
        Self {
            backend,
            store,
            records,
        }
    }

    /// Register `<name>@uni.edu` with [`PASSWORD`].
    pub fn user(&self, name: &str, role: Role) -> Identity {
        self.backend
            .add_user(&format!("{}@uni.edu", name), PASSWORD, name, role)
    }
}

/// Short restore timeout so hung gateways do not slow the suite.
pub fn fast_config() -> SessionConfig {
    SessionConfig::default().with_restore_timeout(Duration::from_millis(100))
}
