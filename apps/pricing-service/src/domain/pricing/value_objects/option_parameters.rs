//! Option Parameters Value Object

use serde::{Deserialize, Serialize};

use crate::domain::pricing::errors::ParameterError;

/// Calendar days per year used to convert year fractions to days.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Inputs to a single pricing request.
///
/// Serialized in camelCase for provider wire formats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionParameters {
    /// Price of the underlying.
    pub underlying_price: f64,
    /// Strike price.
    pub strike_price: f64,
    /// Time to expiration in years.
    pub time_to_expiration: f64,
    /// Volatility, if the caller supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volatility: Option<f64>,
    /// Risk-free rate, if the caller supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_free_rate: Option<f64>,
    /// Dividend yield, if the caller supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<f64>,
}

impl OptionParameters {
    /// Create parameters with the mandatory fields only.
    #[must_use]
    pub const fn new(underlying_price: f64, strike_price: f64, time_to_expiration: f64) -> Self {
        Self {
            underlying_price,
            strike_price,
            time_to_expiration,
            volatility: None,
            risk_free_rate: None,
            dividend_yield: None,
        }
    }

    /// Set the volatility.
    #[must_use]
    pub const fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Set the risk-free rate.
    #[must_use]
    pub const fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = Some(rate);
        self
    }

    /// Set the dividend yield.
    #[must_use]
    pub const fn with_dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = Some(dividend_yield);
        self
    }

    /// Time to expiration expressed in calendar days.
    #[must_use]
    pub fn days_to_expiration(&self) -> f64 {
        self.time_to_expiration * DAYS_PER_YEAR
    }

    /// Check that the mandatory fields are finite and strictly positive.
    pub fn validate(&self) -> Result<(), ParameterError> {
        check_positive("underlying_price", self.underlying_price)?;
        check_positive("strike_price", self.strike_price)?;
        check_positive("time_to_expiration", self.time_to_expiration)
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::NotPositive {
            field,
            value: value.to_string(),
        })
    }
}
