//! Metrics collection and exposition.
//!
//! # Metrics
//! - `chat_requests_total` (counter): chat requests by outcome
//!   (forwarded, rejected, unreachable)
//! - `chat_upstream_latency_seconds` (histogram): time until upstream headers
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one chat request by its outcome.
pub fn record_chat_request(outcome: &'static str) {
    counter!("chat_requests_total", "outcome" => outcome).increment(1);
}

/// Record the time from sending the upstream request to receiving headers.
pub fn record_upstream_latency(start: Instant) {
    histogram!("chat_upstream_latency_seconds").record(start.elapsed().as_secs_f64());
}
