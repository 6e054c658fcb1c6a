//! Pricing Provider Port (Driven Port)
//!
//! Capability contract for any pricing or market-data source. Concrete
//! providers implement it independently and are injected into the
//! orchestration use case as `Arc<dyn PricingProvider>`.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::pricing::{OptionParameters, PricingModel, PricingResult};
use crate::resilience::{ErrorCategory, RetryClassify, categorize_status};

/// Upstream transport or API failure attributed to a provider.
///
/// `code` carries the upstream HTTP status when a response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{provider}] {message}")]
pub struct PricingError {
    /// Provider the failure came from.
    pub provider: String,
    /// Human-readable message.
    pub message: String,
    /// Machine-readable code (HTTP status as string).
    pub code: Option<String>,
}

impl PricingError {
    /// Create a pricing error.
    #[must_use]
    pub fn new(provider: impl Into<String>, message: impl Into<String>, code: Option<String>) -> Self {
        Self {
            provider: provider.into(),
            message: message.into(),
            code,
        }
    }

    /// Upstream HTTP status, if the code is numeric.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.code.as_deref().and_then(|c| c.parse().ok())
    }
}

impl RetryClassify for PricingError {
    fn category(&self) -> ErrorCategory {
        match (&self.code, self.status()) {
            // No response at all: timeout, connection refused, DNS
            (None, _) => ErrorCategory::Retryable,
            (Some(_), Some(status)) => categorize_status(status),
            (Some(_), None) => ErrorCategory::NonRetryable,
        }
    }
}

/// Provider port error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Transport or upstream API failure.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Request rejected before reaching the provider.
    #[error("[{provider}] invalid request: {message}")]
    Validation {
        /// Provider name.
        provider: String,
        /// What was wrong with the request.
        message: String,
    },

    /// Symbol or time range has no data.
    #[error("[{provider}] no data available for symbol '{symbol}'")]
    DataUnavailable {
        /// Provider name.
        provider: String,
        /// Requested symbol.
        symbol: String,
    },

    /// Response body could not be decoded.
    #[error("[{provider}] failed to decode response: {message}")]
    Decode {
        /// Provider name.
        provider: String,
        /// Decoder message.
        message: String,
    },
}

impl ProviderError {
    /// Name of the provider the error is attributed to.
    #[must_use]
    pub fn provider(&self) -> &str {
        match self {
            Self::Pricing(err) => &err.provider,
            Self::Validation { provider, .. }
            | Self::DataUnavailable { provider, .. }
            | Self::Decode { provider, .. } => provider,
        }
    }

    /// Shorthand for a validation failure.
    #[must_use]
    pub fn validation(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

impl RetryClassify for ProviderError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::Pricing(err) => err.category(),
            Self::Validation { .. } | Self::DataUnavailable { .. } | Self::Decode { .. } => {
                ErrorCategory::NonRetryable
            }
        }
    }
}

/// Port for pricing and market-data sources.
///
/// Implementations must be safe to call concurrently for different
/// parameter sets.
#[async_trait]
pub trait PricingProvider: Send + Sync {
    /// Provider name, used to attribute results and errors.
    fn name(&self) -> &str;

    /// Scheduling priority (0-10, lower runs first).
    fn priority(&self) -> u8 {
        5
    }

    /// Model this provider prices with.
    fn model(&self) -> PricingModel;

    /// Price an option.
    ///
    /// Fails with [`ProviderError::Validation`] when underlying price,
    /// strike or time to expiration is not positive.
    async fn calculate_price(
        &self,
        params: OptionParameters,
    ) -> Result<PricingResult, ProviderError>;

    /// Daily price observations for `symbol`, oldest first, `days` long.
    ///
    /// Fails with [`ProviderError::DataUnavailable`] for unknown symbols.
    async fn get_historical_data(&self, symbol: &str, days: u32)
    -> Result<Vec<f64>, ProviderError>;

    /// Symbols this provider can price.
    async fn list_symbols(&self) -> Result<Vec<String>, ProviderError>;
}

/// Check the common `get_historical_data` preconditions.
pub(crate) fn validate_history_request(
    provider: &str,
    symbol: &str,
    days: u32,
) -> Result<(), ProviderError> {
    if symbol.trim().is_empty() {
        return Err(ProviderError::validation(provider, "symbol must not be empty"));
    }
    if days == 0 {
        return Err(ProviderError::validation(provider, "days must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pricing_error_display_includes_provider() {
        let err = PricingError::new("polygon", "Service Unavailable", Some("503".to_string()));
        assert_eq!(err.to_string(), "[polygon] Service Unavailable");
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn transport_errors_without_code_are_retryable() {
        let err = PricingError::new("polygon", "operation timed out", None);
        assert_eq!(err.category(), ErrorCategory::Retryable);
    }

    #[test]
    fn server_errors_are_retryable() {
        let err = PricingError::new("polygon", "Bad Gateway", Some("502".to_string()));
        assert_eq!(err.category(), ErrorCategory::Retryable);
    }

    #[test]
    fn client_errors_are_not_retryable() {
        let err = PricingError::new("polygon", "Unauthorized", Some("401".to_string()));
        assert_eq!(err.category(), ErrorCategory::NonRetryable);
    }

    #[test]
    fn non_numeric_code_is_not_retryable() {
        let err = PricingError::new("polygon", "quota", Some("QUOTA_EXCEEDED".to_string()));
        assert_eq!(err.category(), ErrorCategory::NonRetryable);
    }

    #[test]
    fn provider_error_categories() {
        let pricing: ProviderError = PricingError::new("p", "down", Some("503".to_string())).into();
        assert_eq!(pricing.category(), ErrorCategory::Retryable);
        assert_eq!(
            ProviderError::validation("p", "bad").category(),
            ErrorCategory::NonRetryable
        );
        let unavailable = ProviderError::DataUnavailable {
            provider: "p".to_string(),
            symbol: "XYZ".to_string(),
        };
        assert_eq!(unavailable.category(), ErrorCategory::NonRetryable);
    }

    #[test]
    fn provider_error_attribution() {
        let err: ProviderError = PricingError::new("alpha_vantage", "down", None).into();
        assert_eq!(err.provider(), "alpha_vantage");
        assert_eq!(err.to_string(), "[alpha_vantage] down");

        let err = ProviderError::DataUnavailable {
            provider: "polygon".to_string(),
            symbol: "XYZ".to_string(),
        };
        assert_eq!(err.provider(), "polygon");
        assert_eq!(err.to_string(), "[polygon] no data available for symbol 'XYZ'");
    }

    #[test]
    fn history_request_validation() {
        assert!(validate_history_request("p", "SPY", 30).is_ok());
        assert!(matches!(
            validate_history_request("p", "  ", 30),
            Err(ProviderError::Validation { .. })
        ));
        assert!(matches!(
            validate_history_request("p", "SPY", 0),
            Err(ProviderError::Validation { .. })
        ));
    }
}
