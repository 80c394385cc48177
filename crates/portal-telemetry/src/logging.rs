//! Structured logging setup.
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a single
//! fmt layer. The fmt layer is pretty or JSON, and writes to stderr or to a
//! log file depending on [`TelemetryConfig`].

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::{TelemetryConfig, TelemetryError};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Handle returned once logging is installed.
#[derive(Debug)]
pub struct LoggingGuard {
    service_name: String,
}

impl LoggingGuard {
    /// Service name the subscriber was installed for.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

/// Build the env filter from the configured directive.
pub fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError::Filter(e.to_string()))
}

fn fmt_layer(config: &TelemetryConfig) -> Result<BoxedLayer, TelemetryError> {
    let layer = tracing_subscriber::fmt::layer().with_target(true);

    let Some(path) = &config.log_file else {
        return Ok(if config.json_logs {
            layer.json().with_writer(std::io::stderr).boxed()
        } else {
            layer.with_writer(std::io::stderr).boxed()
        });
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| TelemetryError::LogFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    let writer = Mutex::new(file);

    Ok(if config.json_logs {
        layer.json().with_ansi(false).with_writer(writer).boxed()
    } else {
        layer.with_ansi(false).with_writer(writer).boxed()
    })
}

/// Initialize structured logging.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &TelemetryConfig) -> Result<LoggingGuard, TelemetryError> {
    let filter = build_filter(config)?;
    let layer = fmt_layer(config)?;

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
        .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        log_file = ?config.log_file,
        "Structured logging initialized"
    );

    Ok(LoggingGuard {
        service_name: config.service_name.clone(),
    })
}

/// Log a session-related event with standard fields.
#[macro_export]
macro_rules! log_session_event {
    ($level:ident, $msg:expr, $user_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = "session",
            user_id = %$user_id,
            $($($field)*,)?
            $msg
        )
    };
}
