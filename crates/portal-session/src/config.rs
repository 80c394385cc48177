//! Configuration for the session store

use crate::domain::RoutePath;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Session store configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Where anonymous users are sent
    pub login_path: String,
    /// Upper bound on initial restoration (milliseconds)
    pub restore_timeout_ms: u64,
    /// Minimum password length accepted by sign-up
    pub min_password_len: usize,
    /// Buffered notifications per subscriber before it starts skipping
    pub event_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            restore_timeout_ms: 10_000,
            min_password_len: 6,
            event_capacity: 64,
        }
    }
}

impl SessionConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PORTAL_LOGIN_PATH` (default: /login)
    /// - `PORTAL_RESTORE_TIMEOUT_MS` (default: 10000)
    /// - `PORTAL_MIN_PASSWORD_LEN` (default: 6)
    /// - `PORTAL_EVENT_CAPACITY` (default: 64)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            login_path: env::var("PORTAL_LOGIN_PATH").unwrap_or(defaults.login_path),
            restore_timeout_ms: env::var("PORTAL_RESTORE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.restore_timeout_ms),
            min_password_len: env::var("PORTAL_MIN_PASSWORD_LEN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.min_password_len),
            event_capacity: env::var("PORTAL_EVENT_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.event_capacity),
        }
    }

    /// Restoration timeout as a `Duration`.
    pub fn restore_timeout(&self) -> Duration {
        Duration::from_millis(self.restore_timeout_ms)
    }

    /// Normalized login path.
    pub fn login_route(&self) -> RoutePath {
        RoutePath::new(&self.login_path)
    }

    /// Override the restoration timeout.
    pub fn with_restore_timeout(mut self, timeout: Duration) -> Self {
        self.restore_timeout_ms = timeout.as_millis() as u64;
        self
    }
}
