/// Metrics and telemetry for the moderation relay
///
/// Provides Prometheus-compatible metrics for monitoring:
/// - Moderation actions by outcome
/// - Upstream request counts and latencies
/// - Dropped live notifications

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    // ========== Moderation Metrics ==========

    /// Orchestrated actions by action name and terminal outcome
    pub static ref MODERATION_ACTIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "moderation_actions_total",
        "Total number of moderation actions",
        &["action", "outcome"]
    )
    .unwrap();

    /// Live notifications that could not be delivered
    pub static ref NOTIFICATIONS_DROPPED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "notifications_dropped_total",
        "Total number of live notifications dropped",
        &["topic"]
    )
    .unwrap();

    // ========== Upstream Metrics ==========

    /// Upstream requests by service and status ("error" for transport failures)
    pub static ref UPSTREAM_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "upstream_requests_total",
        "Total number of requests sent to upstream services",
        &["service", "status"]
    )
    .unwrap();

    /// Upstream request duration in seconds
    pub static ref UPSTREAM_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "upstream_request_duration_seconds",
        "Upstream request latencies in seconds",
        &["service"],
        vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .unwrap();
}

/// Render all registered metrics in Prometheus text format
pub fn render_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Record the terminal outcome of an orchestrated action
pub fn record_moderation_action(action: &str, outcome: &str) {
    MODERATION_ACTIONS_TOTAL
        .with_label_values(&[action, outcome])
        .inc();
}

/// Record a dropped notification
pub fn record_notification_dropped(topic: &str) {
    NOTIFICATIONS_DROPPED_TOTAL.with_label_values(&[topic]).inc();
}

/// Record an upstream request; `status` is `None` when no response arrived
pub fn record_upstream_request(service: &str, status: Option<u16>, duration: f64) {
    let status = status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "error".to_string());
    UPSTREAM_REQUESTS_TOTAL
        .with_label_values(&[service, &status])
        .inc();
    UPSTREAM_REQUEST_DURATION_SECONDS
        .with_label_values(&[service])
        .observe(duration);
}
