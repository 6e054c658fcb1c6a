//! Structured logging setup.
//!
//! `RUST_LOG` takes precedence over the configured default filter.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::ObservabilityConfig;

/// Error type for logging setup.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The configured filter directive is malformed.
    #[error("invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// Offending directive.
        filter: String,
        /// Parser message.
        reason: String,
    },
    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Installation(String),
}

/// Build the filter, preferring `RUST_LOG` over `default_filter`.
///
/// # Errors
///
/// Returns `LoggingError::InvalidFilter` if `default_filter` cannot be parsed.
pub fn build_env_filter(default_filter: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(default_filter).map_err(|e| LoggingError::InvalidFilter {
        filter: default_filter.to_string(),
        reason: e.to_string(),
    })
}

/// Install the global `fmt` subscriber.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a subscriber is already set.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<(), LoggingError> {
    let env_filter = build_env_filter(&config.log_filter)?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .map_err(|e| LoggingError::Installation(e.to_string()))?;

    tracing::debug!(filter = %config.log_filter, "Logging initialized");
    Ok(())
}
