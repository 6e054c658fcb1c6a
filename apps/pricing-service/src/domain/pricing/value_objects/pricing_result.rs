//! Pricing Result Value Object

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Greeks, OptionParameters, PricingModel};

/// Output of a provider's pricing operation.
///
/// Created once by a provider and read by the screener; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    /// Option price.
    pub price: f64,
    /// Computed sensitivities.
    pub greeks: Greeks,
    /// Parameters the price was computed for.
    pub parameters: OptionParameters,
    /// Model that produced the price.
    pub model_used: PricingModel,
    /// When the calculation happened.
    pub calculated_at: DateTime<Utc>,
}

impl PricingResult {
    /// Create a result stamped with the current time.
    #[must_use]
    pub fn new(
        price: f64,
        greeks: Greeks,
        parameters: OptionParameters,
        model_used: PricingModel,
    ) -> Self {
        Self {
            price,
            greeks,
            parameters,
            model_used,
            calculated_at: Utc::now(),
        }
    }

    /// Days to expiration of the priced option.
    #[must_use]
    pub fn days_to_expiration(&self) -> f64 {
        self.parameters.days_to_expiration()
    }
}
