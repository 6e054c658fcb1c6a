//! Options Greeks value object.

use serde::{Deserialize, Serialize};

/// Sensitivities of an option's price to its risk factors.
///
/// Values are taken as reported by the provider. Model-specific bounds
/// (e.g. `0 <= delta <= 1` for calls) are not enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta - directional exposure.
    pub delta: f64,
    /// Gamma - rate of change of delta.
    pub gamma: f64,
    /// Theta - time decay.
    pub theta: f64,
    /// Vega - sensitivity to volatility.
    pub vega: f64,
    /// Rho - sensitivity to interest rates.
    pub rho: f64,
}

impl Greeks {
    /// Create new Greeks.
    #[must_use]
    pub const fn new(delta: f64, gamma: f64, theta: f64, vega: f64, rho: f64) -> Self {
        Self {
            delta,
            gamma,
            theta,
            vega,
            rho,
        }
    }

    /// Zero Greeks.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0, 0.0);

    /// Check whether every sensitivity is a finite number.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.delta.is_finite()
            && self.gamma.is_finite()
            && self.theta.is_finite()
            && self.vega.is_finite()
            && self.rho.is_finite()
    }
}
