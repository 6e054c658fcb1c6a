//! Placeholder provider for wiring and local runs.
//!
//! Prices every option at zero with fixed Greeks and serves random
//! histories, so a full scan can run without network access.

use async_trait::async_trait;
use rand::Rng;

use crate::application::ports::{PricingProvider, ProviderError, validate_history_request};
use crate::domain::pricing::{Greeks, OptionParameters, PricingModel, PricingResult};

/// Greeks returned for every priced option.
pub const SIMPLE_GREEKS: Greeks = Greeks::new(0.5, 0.1, -0.05, 0.2, 0.01);

/// Symbols the placeholder provider reports.
pub const SIMPLE_SYMBOLS: [&str; 5] = ["SPY", "QQQ", "IWM", "AAPL", "MSFT"];

/// Upper bound (exclusive) for synthetic historical prices.
const MAX_SYNTHETIC_PRICE: f64 = 100.0;

/// Provider with constant Greeks and synthetic history.
#[derive(Debug, Clone)]
pub struct SimplePricingProvider {
    name: String,
    priority: u8,
    model: PricingModel,
}

impl SimplePricingProvider {
    /// Create a placeholder provider.
    #[must_use]
    pub fn new(name: impl Into<String>, priority: u8, model: PricingModel) -> Self {
        Self {
            name: name.into(),
            priority,
            model,
        }
    }
}

#[async_trait]
impl PricingProvider for SimplePricingProvider {
    fn name(&self) -> &str {
        &self.name
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
            .map_err(|e| ProviderError::validation(&self.name, e.to_string()))?;

        Ok(PricingResult::new(0.0, SIMPLE_GREEKS, params, self.model))
    }

    async fn get_historical_data(
        &self,
        symbol: &str,
        days: u32,
    ) -> Result<Vec<f64>, ProviderError> {
        validate_history_request(&self.name, symbol, days)?;

        let mut rng = rand::rng();
        Ok((0..days)
            .map(|_| rng.random_range(0.0..MAX_SYNTHETIC_PRICE))
            .collect())
    }

    async fn list_symbols(&self) -> Result<Vec<String>, ProviderError> {
        Ok(SIMPLE_SYMBOLS.iter().map(ToString::to_string).collect())
    }
}
