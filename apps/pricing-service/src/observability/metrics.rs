//! Prometheus metrics for provider calls and screening.
//!
//! The recorders are no-ops until [`init_metrics`] installs an exporter,
//! so library code can record unconditionally.
//!
//! # Example
//!
//! ```ignore
//! use pricing_service::observability::{init_metrics, record_provider_request};
//!
//! init_metrics("0.0.0.0:9090".parse()?)?;
//! record_provider_request("polygon", "history", "success", 0.120);
//! ```

use std::net::SocketAddr;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Latency buckets from 10ms to 10s.
const LATENCY_BUCKETS: &[f64] = &[0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`.
///
/// # Errors
///
/// Returns an error if the metrics exporter fails to start (e.g., port already in use).
pub fn init_metrics(listen_addr: SocketAddr) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(listen_addr)
        .set_buckets(LATENCY_BUCKETS)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(addr = %listen_addr, "Prometheus metrics exporter started");

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

/// Record a completed provider request.
///
/// # Arguments
///
/// * `provider` - Provider name (e.g., "polygon")
/// * `operation` - "price", "history" or "symbols"
/// * `status` - "success" or "error"
/// * `latency_seconds` - Wall time including retries
pub fn record_provider_request(provider: &str, operation: &str, status: &str, latency_seconds: f64) {
    counter!(
        "provider_requests_total",
        "provider" => provider.to_string(),
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        "provider_request_duration_seconds",
        "provider" => provider.to_string(),
        "operation" => operation.to_string()
    )
    .record(latency_seconds);
}

/// Record a retry of a provider operation.
pub fn record_provider_retry(operation: &str) {
    counter!("provider_retries_total", "operation" => operation.to_string()).increment(1);
}

/// Record opportunities found in one scan.
///
/// * `kind` - "premium" or "hedge"
pub fn record_opportunities(kind: &str, count: usize) {
    counter!("opportunities_found_total", "kind" => kind.to_string()).increment(count as u64);
}

/// Record a per-symbol failure during a scan.
pub fn record_scan_failure(provider: &str, operation: &str) {
    counter!(
        "scan_failures_total",
        "provider" => provider.to_string(),
        "operation" => operation.to_string()
    )
    .increment(1);
}
