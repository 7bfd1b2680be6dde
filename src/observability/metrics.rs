//! Metrics collection and exposition.
//!
//! # Metrics
//! - `path_rewrite_requests_total` (counter): requests by classification outcome
//! - `upstream_requests_total` (counter): forwarded requests by method, status
//! - `upstream_request_duration_seconds` (histogram): upstream latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::rewrite::Classification;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one inbound request by how its path was classified.
pub fn record_classification(classification: &Classification) {
    metrics::counter!("path_rewrite_requests_total", "outcome" => classification.label())
        .increment(1);
}

/// Record a forwarded request and its latency.
pub fn record_upstream(method: &str, status: u16, start: Instant) {
    let method = method.to_string();
    metrics::counter!(
        "upstream_requests_total",
        "method" => method.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("upstream_request_duration_seconds", "method" => method)
        .record(start.elapsed().as_secs_f64());
}
