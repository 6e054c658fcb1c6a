//! Configuration module for the pricing service.
//!
//! Configuration comes from one of two sources, both resolved against an
//! explicit environment map rather than the process environment:
//!
//! - [`load_config_from_env`]: the built-in provider set, tuned by
//!   environment variables
//! - [`load_config`] / [`load_config_from_string`]: a YAML document with
//!   `${VAR}` and `${VAR:-default}` interpolation
//!
//! Both paths run the same validation and return a [`ConfigError`] on the
//! first problem found.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::collections::HashMap;
//! use pricing_service::config::load_config_from_env;
//!
//! let env: HashMap<String, String> = std::env::vars().collect();
//! let config = load_config_from_env(&env)?;
//! println!("{} providers enabled", config.enabled_providers().count());
//! ```

mod environment;
mod observability;
mod option_grid;
mod providers;
mod validation;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::pricing::PricingModel;
use crate::domain::screening::ScreenerConfig;

pub use environment::load_config_from_env;
pub use observability::ObservabilityConfig;
pub use option_grid::OptionGridConfig;
pub use providers::{DEFAULT_CACHE_TTL_SECS, ProviderConfig, ProviderKind};
pub use validation::validate_config;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    Parse(#[from] serde_yaml_bw::Error),

    /// An environment variable could not be parsed.
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Raw value.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// Configuration validation failed.
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Pricing providers, enabled or not.
    pub providers: Vec<ProviderConfig>,
    /// Application-wide cache lifetime in seconds.
    #[serde(default = "providers::default_cache_ttl_secs")]
    pub cache_ttl: u64,
    /// Default retry count for providers without an override.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Default model for providers without an override.
    #[serde(default)]
    pub default_model: PricingModel,
    /// Screening thresholds.
    #[serde(default)]
    pub opportunity_finder: ScreenerConfig,
    /// Option grid priced for each symbol.
    #[serde(default)]
    pub option_parameters: OptionGridConfig,
    /// Historical observations requested per symbol.
    #[serde(default = "default_history_days")]
    pub history_days: u32,
    /// Seconds between scans.
    #[serde(default = "default_scan_interval_secs")]
    pub scan_interval_secs: u64,
    /// Logging and metrics.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Providers with `enabled` set.
    pub fn enabled_providers(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.providers.iter().filter(|p| p.enabled)
    }

    /// Cache lifetime for `provider`: its own `cacheTtl`, else the application one.
    #[must_use]
    pub fn provider_cache_ttl(&self, provider: &ProviderConfig) -> u64 {
        provider.cache_ttl_secs.unwrap_or(self.cache_ttl)
    }
}

pub(crate) const fn default_max_retries() -> u32 {
    3
}

pub(crate) const fn default_history_days() -> u32 {
    30
}

pub(crate) const fn default_scan_interval_secs() -> u64 {
    300
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file, interpolating variables from `env`.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: &str, env: &HashMap<String, String>) -> Result<AppConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents, env)
}

/// Load configuration from a YAML string, interpolating variables from `env`.
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(
    yaml: &str,
    env: &HashMap<String, String>,
) -> Result<AppConfig, ConfigError> {
    let interpolated = interpolate_env_vars(yaml, env);
    let config: AppConfig = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. Unset or empty
/// variables without a default become empty strings.
#[allow(clippy::expect_used)]
fn interpolate_env_vars(input: &str, env: &HashMap<String, String>) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match env.get(&cap[1]) {
            Some(v) if !v.is_empty() => v.clone(),
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}
