//! Pricing provider configuration.

use serde::{Deserialize, Serialize};

use crate::domain::pricing::PricingModel;

/// Which provider implementation backs a configuration entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Placeholder provider with constant Greeks and synthetic history.
    #[default]
    Simple,
    /// Remote provider reached over HTTP.
    Http,
}

/// Configuration for a single pricing provider.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Provider identifier.
    pub name: String,
    /// Bearer credential. An unset `${VAR}` interpolates to YAML null, read as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub api_key: String,
    /// Absolute base URL for requests.
    pub base_url: String,
    /// Whether the provider participates in scans.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Scheduling priority (0-10, lower runs first).
    #[serde(default = "default_priority")]
    pub priority: u8,
    /// HTTP timeout in milliseconds.
    #[serde(rename = "timeout", default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Historical data cache lifetime in seconds; falls back to the application `cacheTtl`.
    #[serde(rename = "cacheTtl", default)]
    pub cache_ttl_secs: Option<u64>,
    /// Provider implementation.
    #[serde(default)]
    pub kind: ProviderKind,
    /// Retry count override; falls back to the application `maxRetries`.
    #[serde(default)]
    pub retries: Option<u32>,
    /// Pricing model override; falls back to the application `defaultModel`.
    #[serde(default)]
    pub model: Option<PricingModel>,
}

impl ProviderConfig {
    /// Create an enabled provider configuration with default settings.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            enabled: true,
            priority: default_priority(),
            timeout_ms: default_timeout_ms(),
            cache_ttl_secs: None,
            kind: ProviderKind::default(),
            retries: None,
            model: None,
        }
    }

    /// Set the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Set the provider kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: ProviderKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the historical data cache lifetime.
    #[must_use]
    pub const fn with_cache_ttl_secs(mut self, cache_ttl_secs: u64) -> Self {
        self.cache_ttl_secs = Some(cache_ttl_secs);
        self
    }

    /// Enable or disable the provider.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

// Keep the credential out of logs.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("enabled", &self.enabled)
            .field("priority", &self.priority)
            .field("timeout_ms", &self.timeout_ms)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("kind", &self.kind)
            .field("retries", &self.retries)
            .field("model", &self.model)
            .finish()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

const fn default_true() -> bool {
    true
}

const fn default_priority() -> u8 {
    5
}

const fn default_timeout_ms() -> u64 {
    5000
}

/// Cache lifetime used when neither the provider nor the application sets one.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

pub(crate) const fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}
