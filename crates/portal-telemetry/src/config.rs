//! Telemetry configuration from environment variables.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Configuration for logging and metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full
    /// `EnvFilter` directive such as `portal_session=debug,info`
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Write logs to this file instead of stderr.
    ///
    /// Terminal front-ends must set this, otherwise log lines are drawn
    /// over the UI.
    pub log_file: Option<PathBuf>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "university-portal".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            log_file: None,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PORTAL_SERVICE_NAME`: Service name (default: university-portal)
    /// - `PORTAL_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `PORTAL_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `PORTAL_LOG_FILE`: Log file path (default: stderr)
    pub fn from_env() -> Self {
        Self {
            service_name: env::var("PORTAL_SERVICE_NAME")
                .unwrap_or_else(|_| "university-portal".to_string()),

            log_level: env::var("PORTAL_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("PORTAL_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),

            log_file: env::var("PORTAL_LOG_FILE").ok().map(PathBuf::from),
        }
    }

    /// Route logs to a file.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }
}
