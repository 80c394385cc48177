//! Backend configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Where the hosted backend lives and how to talk to it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub base_url: String,
    /// Public anonymous API key sent as `apikey`
    pub anon_key: String,
    /// Whole-request timeout (milliseconds)
    pub request_timeout_ms: u64,
    /// Connect timeout (milliseconds)
    pub connect_timeout_ms: u64,
    /// Directory holding the persisted credential
    pub data_dir: PathBuf,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:54321".to_string(),
            anon_key: String::new(),
            request_timeout_ms: 10_000,
            connect_timeout_ms: 3_000,
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".university-portal")
}

impl BackendConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PORTAL_BACKEND_URL` (default: http://127.0.0.1:54321)
    /// - `PORTAL_ANON_KEY` (default: empty)
    /// - `PORTAL_REQUEST_TIMEOUT_MS` (default: 10000)
    /// - `PORTAL_CONNECT_TIMEOUT_MS` (default: 3000)
    /// - `PORTAL_DATA_DIR` (default: ~/.university-portal)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("PORTAL_BACKEND_URL").unwrap_or(defaults.base_url),
            anon_key: env::var("PORTAL_ANON_KEY").unwrap_or(defaults.anon_key),
            request_timeout_ms: env::var("PORTAL_REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_ms),
            connect_timeout_ms: env::var("PORTAL_CONNECT_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.connect_timeout_ms),
            data_dir: env::var_os("PORTAL_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Base URL without a trailing slash.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// File the persisted credential is written to.
    pub fn credential_path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }
}
