//! # Portal Telemetry
//!
//! Logging and metrics for the university portal.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` registry with an `EnvFilter` and a
//!   pretty or JSON fmt layer, writing to stderr or a log file
//! - **Metrics**: Prometheus counters for session transitions, auth
//!   requests, guard decisions and record fetches
//!
//! ## Usage
//!
//! ```rust,ignore
//! use portal_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env().with_log_file("portal.log");
//! let _guard = init_telemetry(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PORTAL_SERVICE_NAME` | `university-portal` | Service name in logs |
//! | `PORTAL_LOG_LEVEL` | `info` | Log filter directive |
//! | `PORTAL_JSON_LOGS` | `false` | JSON formatted logs |
//! | `PORTAL_LOG_FILE` | unset | Log file instead of stderr |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging, LoggingGuard};
pub use metrics::{
    encode_metrics, record_auth, record_fetch, record_guard, record_transition,
    register_metrics,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log filter directive could not be parsed
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// The log file could not be opened
    #[error("Cannot open log file {path}: {reason}")]
    LogFile {
        /// Path that failed to open
        path: String,
        /// OS error text
        reason: String,
    },

    /// A global subscriber was already installed
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    /// Metric registration or encoding failed
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Initialize logging and register metrics.
///
/// The returned guard should be held for the lifetime of the application.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<LoggingGuard, TelemetryError> {
    register_metrics()?;
    init_logging(config)
}
