//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method and status
//! - `gateway_request_duration_seconds` (histogram): end-to-end latency
//! - `gateway_rpc_total` (counter): backend calls by rpc and status
//! - `gateway_rpc_duration_seconds` (histogram): backend call latency
//!
//! Recording is a no-op until [`init_metrics`] installs an exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

const METRIC_REQUESTS_TOTAL: &str = "gateway_requests_total";
const METRIC_REQUEST_DURATION: &str = "gateway_request_duration_seconds";
const METRIC_RPC_TOTAL: &str = "gateway_rpc_total";
const METRIC_RPC_DURATION: &str = "gateway_rpc_duration_seconds";

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled HTTP request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    let method = method.to_string();
    metrics::counter!(
        METRIC_REQUESTS_TOTAL,
        "method" => method.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(METRIC_REQUEST_DURATION, "method" => method)
        .record(start.elapsed().as_secs_f64());
}

/// Record one backend call and its outcome.
pub fn record_rpc(rpc: &'static str, status: &'static str, start: Instant) {
    metrics::counter!(METRIC_RPC_TOTAL, "rpc" => rpc, "status" => status).increment(1);
    metrics::histogram!(METRIC_RPC_DURATION, "rpc" => rpc).record(start.elapsed().as_secs_f64());
}
