//! Metrics collection and exposition.
//!
//! # Metrics
//! - `http_requests_total` (counter): requests by method, status
//! - `http_request_duration_seconds` (histogram): latency distribution
//! - `goat_escalations_total` (counter): escalator responses by label
//! - `goat_terminations_scheduled_total` (counter): deferred terminations spawned
//!
//! Without an installed recorder every call is a no-op, so tests and library
//! users pay nothing.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
];

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    let builder = match PrometheusBuilder::new().set_buckets(LATENCY_BUCKETS) {
        Ok(builder) => builder,
        Err(e) => {
            tracing::error!(error = %e, "Invalid histogram buckets");
            return;
        }
    };

    match builder.with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("http_requests_total", &labels).increment(1);
    metrics::histogram!("http_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_escalation(label: &'static str) {
    metrics::counter!("goat_escalations_total", "label" => label).increment(1);
}

pub fn record_termination_scheduled() {
    metrics::counter!("goat_terminations_scheduled_total").increment(1);
}
