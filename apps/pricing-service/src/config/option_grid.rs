//! Option parameter grid scanned for every symbol.

use serde::{Deserialize, Serialize};

use crate::domain::pricing::OptionParameters;

/// Strikes and expirations priced per symbol, plus shared market inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionGridConfig {
    /// Absolute strike prices.
    #[serde(default = "default_strike_prices")]
    pub strike_prices: Vec<f64>,
    /// Expirations in years.
    #[serde(default = "default_expirations")]
    pub expirations: Vec<f64>,
    /// Volatility passed to providers.
    #[serde(default = "default_volatility")]
    pub volatility: f64,
    /// Risk-free rate passed to providers.
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
    /// Dividend yield passed to providers.
    #[serde(default)]
    pub dividend_yield: f64,
}

impl Default for OptionGridConfig {
    fn default() -> Self {
        Self {
            strike_prices: default_strike_prices(),
            expirations: default_expirations(),
            volatility: default_volatility(),
            risk_free_rate: default_risk_free_rate(),
            dividend_yield: 0.0,
        }
    }
}

impl OptionGridConfig {
    /// Every strike × expiration combination for one underlying price.
    ///
    /// Strikes vary slowest, so results group by strike.
    #[must_use]
    pub fn parameters_for(&self, underlying_price: f64) -> Vec<OptionParameters> {
        self.strike_prices
            .iter()
            .flat_map(|&strike| {
                self.expirations.iter().map(move |&expiration| {
                    OptionParameters::new(underlying_price, strike, expiration)
                        .with_volatility(self.volatility)
                        .with_risk_free_rate(self.risk_free_rate)
                        .with_dividend_yield(self.dividend_yield)
                })
            })
            .collect()
    }
}

pub(crate) fn default_strike_prices() -> Vec<f64> {
    vec![90.0, 100.0, 110.0]
}

pub(crate) fn default_expirations() -> Vec<f64> {
    vec![0.5, 1.0]
}

pub(crate) const fn default_volatility() -> f64 {
    0.2
}

pub(crate) const fn default_risk_free_rate() -> f64 {
    0.01
}
