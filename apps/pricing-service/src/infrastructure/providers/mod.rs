//! Pricing provider adapters.
//!
//! - [`SimplePricingProvider`]: constant Greeks and synthetic history
//! - [`HttpPricingProvider`]: remote pricing API over HTTP
//!
//! [`build_providers`] turns the enabled configuration entries into
//! `Arc<dyn PricingProvider>` handles for the scan use case.

mod api_types;
mod cache;
mod http_client;
mod http_provider;
mod simple_provider;

use std::sync::Arc;

pub use api_types::{ApiErrorResponse, HistoryResponse, PriceResponse, SymbolsResponse};
pub use cache::HistoryCache;
pub use http_client::{ProviderHttpClient, QueryParams, extract_message};
pub use http_provider::HttpPricingProvider;
pub use simple_provider::{SIMPLE_GREEKS, SIMPLE_SYMBOLS, SimplePricingProvider};

use crate::application::ports::{PricingProvider, ProviderError};
use crate::config::{AppConfig, ProviderKind};
use crate::resilience::RetryPolicy;

/// Build one provider per enabled configuration entry.
///
/// Per-provider `retries`, `model` and `cacheTtl` override the application defaults.
///
/// # Errors
///
/// Returns a `ProviderError` if an HTTP provider cannot be constructed.
pub fn build_providers(config: &AppConfig) -> Result<Vec<Arc<dyn PricingProvider>>, ProviderError> {
    config
        .enabled_providers()
        .map(|provider| -> Result<Arc<dyn PricingProvider>, ProviderError> {
            let model = provider.model.unwrap_or(config.default_model);
            let retries = provider.retries.unwrap_or(config.max_retries);
            let cache_ttl = config.provider_cache_ttl(provider);

            let built: Arc<dyn PricingProvider> = match provider.kind {
                ProviderKind::Simple => Arc::new(SimplePricingProvider::new(
                    provider.name.clone(),
                    provider.priority,
                    model,
                )),
                ProviderKind::Http => Arc::new(HttpPricingProvider::new(
                    &provider.clone().with_cache_ttl_secs(cache_ttl),
                    model,
                    RetryPolicy::with_max_retries(retries),
                )?),
            };

            tracing::info!(
                provider = %provider.name,
                kind = ?provider.kind,
                priority = provider.priority,
                model = %model,
                retries,
                cache_ttl,
                "Provider configured"
            );
            Ok(built)
        })
        .collect()
}
