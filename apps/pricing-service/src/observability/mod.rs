//! Observability module for logging and metrics.
//!
//! Structured logs go through `tracing`; counters and latency histograms
//! are exported to Prometheus when a listen address is configured.

mod logging;
mod metrics;

pub use logging::{LoggingError, build_env_filter, init_tracing};
pub use metrics::{
    MetricsError, init_metrics, record_opportunities, record_provider_request,
    record_provider_retry, record_scan_failure,
};
