//! Prometheus counters for the portal.
//!
//! All metrics follow the naming convention: `portal_<component>_<metric>_total`.
//! Counters count even when [`register_metrics`] was never called; they are
//! only exported once registered.

use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // SESSION METRICS
    // =========================================================================

    /// Session store transitions by kind
    pub static ref SESSION_TRANSITIONS: CounterVec = CounterVec::new(
        Opts::new("portal_session_transitions_total", "Session store transitions"),
        &["transition"]
    ).expect("metric creation failed");

    /// Auth gateway requests
    pub static ref AUTH_REQUESTS: CounterVec = CounterVec::new(
        Opts::new("portal_auth_requests_total", "Auth gateway requests"),
        &["operation", "outcome"]  // outcome: ok/error
    ).expect("metric creation failed");

    // =========================================================================
    // GUARD METRICS
    // =========================================================================

    /// Route guard decisions
    pub static ref GUARD_DECISIONS: CounterVec = CounterVec::new(
        Opts::new("portal_guard_decisions_total", "Route authorization decisions"),
        &["decision"]  // decision: suspend/allow/redirect_login/redirect_home
    ).expect("metric creation failed");

    // =========================================================================
    // RECORDS METRICS
    // =========================================================================

    /// Record fetches by table and outcome
    pub static ref RECORD_FETCHES: CounterVec = CounterVec::new(
        Opts::new("portal_records_fetches_total", "Record source fetches"),
        &["kind", "outcome"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Calling this more than once is harmless.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(SESSION_TRANSITIONS.clone()),
        Box::new(AUTH_REQUESTS.clone()),
        Box::new(GUARD_DECISIONS.clone()),
        Box::new(RECORD_FETCHES.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Count a session transition.
pub fn record_transition(transition: &str) {
    SESSION_TRANSITIONS.with_label_values(&[transition]).inc();
}

/// Count an auth gateway request.
pub fn record_auth(operation: &str, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    AUTH_REQUESTS.with_label_values(&[operation, outcome]).inc();
}

/// Count a guard decision.
pub fn record_guard(decision: &str) {
    GUARD_DECISIONS.with_label_values(&[decision]).inc();
}

/// Count a record fetch.
pub fn record_fetch(kind: &str, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    RECORD_FETCHES.with_label_values(&[kind, outcome]).inc();
}
