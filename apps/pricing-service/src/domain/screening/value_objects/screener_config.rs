//! Screener thresholds.

use serde::{Deserialize, Serialize};

/// Inclusive delta bounds, `(lower, upper)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaRange(pub f64, pub f64);

impl DeltaRange {
    /// Lower bound.
    #[must_use]
    pub const fn lower(&self) -> f64 {
        self.0
    }

    /// Upper bound.
    #[must_use]
    pub const fn upper(&self) -> f64 {
        self.1
    }

    /// Check whether `delta` lies within the range, bounds included.
    #[must_use]
    pub fn contains(&self, delta: f64) -> bool {
        delta >= self.0 && delta <= self.1
    }
}

impl Default for DeltaRange {
    fn default() -> Self {
        Self(0.3, 0.7)
    }
}

/// Thresholds for both screening passes.
///
/// Premium thresholds:
/// - `volatility_threshold`: vega must be strictly greater
/// - `min_days_to_expiry`: days to expiry must be at least this
/// - `target_delta_range`: delta must fall inside, inclusive
///
/// Hedge thresholds:
/// - `hedge_min_gamma`: gamma must be strictly greater
/// - `hedge_max_days_to_expiry`: days to expiry must be at most this
/// - `hedge_max_theta`: theta must be strictly lower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerConfig {
    /// Minimum vega for a premium opportunity (exclusive).
    #[serde(default = "default_volatility_threshold")]
    pub volatility_threshold: f64,
    /// Minimum days to expiry for a premium opportunity (inclusive).
    #[serde(default = "default_min_days_to_expiry")]
    pub min_days_to_expiry: u32,
    /// Delta bounds for a premium opportunity.
    #[serde(default)]
    pub target_delta_range: DeltaRange,
    /// Minimum gamma for a hedge opportunity (exclusive).
    #[serde(default = "default_hedge_min_gamma")]
    pub hedge_min_gamma: f64,
    /// Maximum days to expiry for a hedge opportunity (inclusive).
    #[serde(default = "default_hedge_max_days_to_expiry")]
    pub hedge_max_days_to_expiry: u32,
    /// Maximum theta for a hedge opportunity (exclusive).
    #[serde(default = "default_hedge_max_theta")]
    pub hedge_max_theta: f64,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            volatility_threshold: default_volatility_threshold(),
            min_days_to_expiry: default_min_days_to_expiry(),
            target_delta_range: DeltaRange::default(),
            hedge_min_gamma: default_hedge_min_gamma(),
            hedge_max_days_to_expiry: default_hedge_max_days_to_expiry(),
            hedge_max_theta: default_hedge_max_theta(),
        }
    }
}

pub(crate) const fn default_volatility_threshold() -> f64 {
    0.3
}

pub(crate) const fn default_min_days_to_expiry() -> u32 {
    14
}

pub(crate) const fn default_hedge_min_gamma() -> f64 {
    0.1
}

pub(crate) const fn default_hedge_max_days_to_expiry() -> u32 {
    30
}

pub(crate) const fn default_hedge_max_theta() -> f64 {
    -0.05
}
