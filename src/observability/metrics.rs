//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define service metrics (requests, lookups, attempts)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `http_requests_total` (counter): inbound requests by endpoint, status
//! - `http_request_duration_seconds` (histogram): inbound latency
//! - `user_lookups_total` (counter): lookups by policy, outcome
//! - `user_lookup_attempts_total` (counter): upstream attempts by operation
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op
//! - Labels are low-cardinality (no user ids)

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed inbound request.
pub fn record_request(endpoint: &'static str, status: u16, start_time: Instant) {
    metrics::counter!(
        "http_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("http_request_duration_seconds", "endpoint" => endpoint)
        .record(start_time.elapsed().as_secs_f64());
}

/// Record the final outcome of one user lookup.
pub fn record_lookup(policy: &'static str, outcome: &'static str) {
    metrics::counter!("user_lookups_total", "policy" => policy, "outcome" => outcome).increment(1);
}

/// Record one upstream attempt made by a retry loop.
pub fn record_attempt(operation: &'static str) {
    metrics::counter!("user_lookup_attempts_total", "operation" => operation).increment(1);
}
