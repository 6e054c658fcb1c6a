//! Observability configuration for logging and metrics.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservabilityConfig {
    /// Prometheus listener address; metrics are not exported when unset.
    #[serde(default)]
    pub metrics_addr: Option<SocketAddr>,
    /// Log filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_addr: None,
            log_filter: default_log_filter(),
        }
    }
}

pub(crate) fn default_log_filter() -> String {
    "pricing_service=info".to_string()
}
