//! Pricing Model Value Object

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::pricing::errors::ParameterError;

/// Pricing model used to produce a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingModel {
    /// Closed-form Black-Scholes.
    #[default]
    BlackScholes,
    /// Binomial tree.
    Binomial,
    /// Monte-Carlo simulation.
    MonteCarlo,
}

impl PricingModel {
    /// Wire identifier of the model.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BlackScholes => "black-scholes",
            Self::Binomial => "binomial",
            Self::MonteCarlo => "monte-carlo",
        }
    }
}

impl std::fmt::Display for PricingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingModel {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "black-scholes" => Ok(Self::BlackScholes),
            "binomial" => Ok(Self::Binomial),
            "monte-carlo" => Ok(Self::MonteCarlo),
            other => Err(ParameterError::UnknownModel(other.to_string())),
        }
    }
}
