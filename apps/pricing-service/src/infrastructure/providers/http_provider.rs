//! Pricing provider backed by a remote HTTP API.
//!
//! Endpoints, relative to the configured base URL:
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | POST | `/price` | `{price, greeks, model?}` |
//! | GET | `/history?symbol=&days=` | `{prices}` (empty or 404: no data) |
//! | GET | `/symbols` | `{symbols}` |
//!
//! Every call runs under [`with_retry`]. Historical series are cached for
//! the provider's `cacheTtl`.

use std::future::Future;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::api_types::{HistoryResponse, PriceResponse, SymbolsResponse};
use super::cache::HistoryCache;
use super::http_client::{ProviderHttpClient, QueryParams};
use crate::application::ports::{
    PricingError, PricingProvider, ProviderError, validate_history_request,
};
use crate::config::{DEFAULT_CACHE_TTL_SECS, ProviderConfig};
use crate::domain::pricing::{OptionParameters, PricingModel, PricingResult};
use crate::observability::record_provider_request;
use crate::resilience::{RetryPolicy, with_retry};

/// Remote pricing provider.
#[derive(Debug)]
pub struct HttpPricingProvider {
    client: ProviderHttpClient,
    priority: u8,
    model: PricingModel,
    retry_policy: RetryPolicy,
    history_cache: HistoryCache,
}

impl HttpPricingProvider {
    /// Create a provider from its configuration.
    ///
    /// History is cached for the provider's `cacheTtl`, or
    /// [`DEFAULT_CACHE_TTL_SECS`] when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        config: &ProviderConfig,
        model: PricingModel,
        retry_policy: RetryPolicy,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: ProviderHttpClient::new(config)?,
            priority: config.priority,
            model,
            retry_policy,
            history_cache: HistoryCache::new(Duration::from_secs(
                config.cache_ttl_secs.unwrap_or(DEFAULT_CACHE_TTL_SECS),
            )),
        })
    }

    /// Run one operation with retries and record its outcome.
    async fn call<T, F, Fut>(&self, operation: &str, f: F) -> Result<T, ProviderError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let label = format!("{}.{operation}", self.client.provider());
        let start = Instant::now();

        let result = with_retry(&self.retry_policy, &label, f).await;

        let status = if result.is_ok() { "success" } else { "error" };
        record_provider_request(
            self.client.provider(),
            operation,
            status,
            start.elapsed().as_secs_f64(),
        );
        result
    }

    fn decode_error(&self, message: impl Into<String>) -> ProviderError {
        ProviderError::Decode {
            provider: self.client.provider().to_string(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl PricingProvider for HttpPricingProvider {
    fn name(&self) -> &str {
        self.client.provider()
    }

    fn priority(&self) -> u8 {
        self.priority
    }

    fn model(&self) -> PricingModel {
        self.model
    }

    async fn calculate_price(
        &self,
        params: OptionParameters,
    ) -> Result<PricingResult, ProviderError> {
        params
            .validate()
            .map_err(|e| ProviderError::validation(self.name(), e.to_string()))?;

        let client = &self.client;
        let body = &params;
        let response: PriceResponse = self
            .call("price", move || client.post("/price", body))
            .await?;

        if let Some(reported) = response.model
            && reported != self.model
        {
            return Err(self.decode_error(format!(
                "priced with {reported}, expected {}",
                self.model
            )));
        }
        if !response.price.is_finite() || !response.greeks.is_finite() {
            return Err(self.decode_error("non-finite price or greeks"));
        }

        Ok(PricingResult::new(
            response.price,
            response.greeks,
            params,
            self.model,
        ))
    }

    async fn get_historical_data(
        &self,
        symbol: &str,
        days: u32,
    ) -> Result<Vec<f64>, ProviderError> {
        validate_history_request(self.name(), symbol, days)?;

        if let Some(prices) = self.history_cache.get(symbol, days) {
            tracing::debug!(provider = self.name(), symbol, days, "History cache hit");
            return Ok(prices);
        }

        let client = &self.client;
        let query = &QueryParams::new().with("symbol", symbol).with("days", days);
        let response: HistoryResponse = self
            .call("history", move || async move {
                client
                    .get("/history", query)
                    .await
                    .map_err(|e| not_found_as_unavailable(e, symbol))
            })
            .await?;

        if response.prices.is_empty() {
            return Err(ProviderError::DataUnavailable {
                provider: self.name().to_string(),
                symbol: symbol.to_string(),
            });
        }
        if response.prices.len() != days as usize {
            return Err(self.decode_error(format!(
                "expected {days} prices for {symbol}, got {}",
                response.prices.len()
            )));
        }

        self.history_cache.put(symbol, days, response.prices.clone());
        Ok(response.prices)
    }

    async fn list_symbols(&self) -> Result<Vec<String>, ProviderError> {
        let client = &self.client;
        let query = &QueryParams::new();
        let response: SymbolsResponse = self
            .call("symbols", move || client.get("/symbols", query))
            .await?;
        Ok(response.symbols)
    }
}

/// An HTTP 404 from `/history` means the symbol has no data.
fn not_found_as_unavailable(error: ProviderError, symbol: &str) -> ProviderError {
    match error {
        ProviderError::Pricing(PricingError { provider, code, .. })
            if code.as_deref() == Some("404") =>
        {
            ProviderError::DataUnavailable {
                provider,
                symbol: symbol.to_string(),
            }
        }
        other => other,
    }
}
