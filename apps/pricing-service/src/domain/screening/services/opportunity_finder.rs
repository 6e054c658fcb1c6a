//! Opportunity Finder Service
//!
//! Filters pricing results against the configured thresholds. Both passes
//! are order-preserving filters: the output is always a subsequence of the
//! input, and an empty or non-matching input yields an empty output.

use crate::domain::pricing::{PricingModel, PricingResult};
use crate::domain::screening::value_objects::ScreenerConfig;

/// Screens pricing results for premium-selling and hedging candidates.
#[derive(Debug, Clone, Default)]
pub struct OpportunityFinder {
    config: ScreenerConfig,
}

impl OpportunityFinder {
    /// Create a finder with the given thresholds.
    #[must_use]
    pub const fn new(config: ScreenerConfig) -> Self {
        Self { config }
    }

    /// Thresholds in use.
    #[must_use]
    pub const fn config(&self) -> &ScreenerConfig {
        &self.config
    }

    /// Results worth selling premium on.
    ///
    /// Only Black-Scholes results qualify. Vega must exceed the volatility
    /// threshold, the option must have at least `min_days_to_expiry` days
    /// left, and delta must fall inside the target range (inclusive).
    #[must_use]
    pub fn find_premium_opportunities(&self, results: &[PricingResult]) -> Vec<PricingResult> {
        results
            .iter()
            .filter(|result| self.is_premium_opportunity(result))
            .cloned()
            .collect()
    }

    /// Results suitable for hedging gamma exposure.
    ///
    /// Gamma must exceed `hedge_min_gamma`, the option must expire within
    /// `hedge_max_days_to_expiry` days, and theta must be below
    /// `hedge_max_theta`.
    #[must_use]
    pub fn find_hedge_opportunities(&self, results: &[PricingResult]) -> Vec<PricingResult> {
        results
            .iter()
            .filter(|result| self.is_hedge_opportunity(result))
            .cloned()
            .collect()
    }

    /// Check a single result against the premium criteria.
    #[must_use]
    pub fn is_premium_opportunity(&self, result: &PricingResult) -> bool {
        result.model_used == PricingModel::BlackScholes
            && result.greeks.vega > self.config.volatility_threshold
            && result.days_to_expiration() >= f64::from(self.config.min_days_to_expiry)
            && self.config.target_delta_range.contains(result.greeks.delta)
    }

    /// Check a single result against the hedge criteria.
    #[must_use]
    pub fn is_hedge_opportunity(&self, result: &PricingResult) -> bool {
        result.greeks.gamma > self.config.hedge_min_gamma
            && result.days_to_expiration() <= f64::from(self.config.hedge_max_days_to_expiry)
            && result.greeks.theta < self.config.hedge_max_theta
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::*;
    use crate::domain::pricing::{Greeks, OptionParameters};
    use crate::domain::screening::DeltaRange;

    fn result(model: PricingModel, greeks: Greeks, time_to_expiration: f64) -> PricingResult {
        PricingResult::new(
            0.0,
            greeks,
            OptionParameters::new(100.0, 100.0, time_to_expiration),
            model,
        )
    }

    fn premium_candidate(vega: f64, delta: f64, time_to_expiration: f64) -> PricingResult {
        result(
            PricingModel::BlackScholes,
            Greeks::new(delta, 0.0, 0.0, vega, 0.0),
            time_to_expiration,
        )
    }

    fn hedge_candidate(gamma: f64, theta: f64, time_to_expiration: f64) -> PricingResult {
        result(
            PricingModel::BlackScholes,
            Greeks::new(0.5, gamma, theta, 0.0, 0.0),
            time_to_expiration,
        )
    }

    #[test]
    fn premium_includes_qualifying_result() {
        let finder = OpportunityFinder::default();
        let input = vec![premium_candidate(0.4, 0.5, 0.1)];

        assert_eq!(finder.find_premium_opportunities(&input), input);
    }

    #[test]
    fn premium_excludes_low_vega() {
        let finder = OpportunityFinder::default();
        let input = vec![premium_candidate(0.2, 0.5, 0.1)];

        assert!(finder.find_premium_opportunities(&input).is_empty());
    }

    #[test_case(PricingModel::Binomial ; "binomial")]
    #[test_case(PricingModel::MonteCarlo ; "monte carlo")]
    fn premium_excludes_other_models(model: PricingModel) {
        let finder = OpportunityFinder::default();
        let input = vec![result(model, Greeks::new(0.5, 0.0, 0.0, 0.9, 0.0), 1.0)];

        assert!(finder.find_premium_opportunities(&input).is_empty());
    }

    #[test_case(0.3, false ; "vega equal to threshold is excluded")]
    #[test_case(0.30001, true ; "vega just above threshold is included")]
    fn premium_vega_boundary(vega: f64, expected: bool) {
        let finder = OpportunityFinder::default();
        assert_eq!(
            finder.is_premium_opportunity(&premium_candidate(vega, 0.5, 1.0)),
            expected
        );
    }

    #[test_case(0.3, true ; "delta at lower bound")]
    #[test_case(0.7, true ; "delta at upper bound")]
    #[test_case(0.29, false ; "delta below range")]
    #[test_case(0.71, false ; "delta above range")]
    fn premium_delta_boundary(delta: f64, expected: bool) {
        let finder = OpportunityFinder::default();
        assert_eq!(
            finder.is_premium_opportunity(&premium_candidate(0.4, delta, 1.0)),
            expected
        );
    }

    #[test]
    fn premium_min_days_is_inclusive() {
        let finder = OpportunityFinder::new(ScreenerConfig {
            min_days_to_expiry: 365,
            ..ScreenerConfig::default()
        });

        assert!(finder.is_premium_opportunity(&premium_candidate(0.4, 0.5, 1.0)));
        assert!(!finder.is_premium_opportunity(&premium_candidate(0.4, 0.5, 0.5)));
    }

    #[test]
    fn premium_respects_custom_delta_range() {
        let finder = OpportunityFinder::new(ScreenerConfig {
            target_delta_range: DeltaRange(0.1, 0.2),
            ..ScreenerConfig::default()
        });

        assert!(finder.is_premium_opportunity(&premium_candidate(0.4, 0.15, 1.0)));
        assert!(!finder.is_premium_opportunity(&premium_candidate(0.4, 0.5, 1.0)));
    }

    #[test]
    fn hedge_includes_qualifying_result() {
        let finder = OpportunityFinder::default();
        let input = vec![hedge_candidate(0.2, -0.1, 20.0 / 365.0)];

        assert_eq!(finder.find_hedge_opportunities(&input), input);
    }

    #[test_case(0.1, -0.1, false ; "gamma equal to threshold is excluded")]
    #[test_case(0.2, -0.05, false ; "theta equal to threshold is excluded")]
    #[test_case(0.2, -0.04, false ; "theta above threshold is excluded")]
    #[test_case(0.2, -0.06, true ; "theta below threshold is included")]
    fn hedge_greek_boundaries(gamma: f64, theta: f64, expected: bool) {
        let finder = OpportunityFinder::default();
        assert_eq!(
            finder.is_hedge_opportunity(&hedge_candidate(gamma, theta, 0.05)),
            expected
        );
    }

    #[test]
    fn hedge_max_days_is_inclusive() {
        let finder = OpportunityFinder::new(ScreenerConfig {
            hedge_max_days_to_expiry: 365,
            ..ScreenerConfig::default()
        });

        assert!(finder.is_hedge_opportunity(&hedge_candidate(0.2, -0.1, 1.0)));
        assert!(!finder.is_hedge_opportunity(&hedge_candidate(0.2, -0.1, 1.5)));
    }

    #[test]
    fn hedge_excludes_long_dated_by_default() {
        let finder = OpportunityFinder::default();
        assert!(!finder.is_hedge_opportunity(&hedge_candidate(0.2, -0.1, 0.5)));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let finder = OpportunityFinder::default();
        assert!(finder.find_premium_opportunities(&[]).is_empty());
        assert!(finder.find_hedge_opportunities(&[]).is_empty());
    }

    #[test]
    fn output_preserves_input_order() {
        let finder = OpportunityFinder::default();
        let input = vec![
            premium_candidate(0.9, 0.4, 1.0),
            premium_candidate(0.1, 0.4, 1.0),
            premium_candidate(0.5, 0.6, 1.0),
            premium_candidate(0.35, 0.3, 1.0),
        ];

        let output = finder.find_premium_opportunities(&input);
        let vegas: Vec<f64> = output.iter().map(|r| r.greeks.vega).collect();
        assert_eq!(vegas, vec![0.9, 0.5, 0.35]);
    }

    fn arb_model() -> impl Strategy<Value = PricingModel> {
        prop_oneof![
            Just(PricingModel::BlackScholes),
            Just(PricingModel::Binomial),
            Just(PricingModel::MonteCarlo),
        ]
    }

    fn arb_result() -> impl Strategy<Value = PricingResult> {
        (
            arb_model(),
            0.0..1.0f64,
            0.0..0.5f64,
            -0.5..0.1f64,
            0.0..1.0f64,
            0.001..2.0f64,
        )
            .prop_map(|(model, delta, gamma, theta, vega, tte)| {
                result(model, Greeks::new(delta, gamma, theta, vega, 0.0), tte)
            })
    }

    /// True when `needle` appears in `haystack` in the same relative order.
    fn is_subsequence(needle: &[PricingResult], haystack: &[PricingResult]) -> bool {
        let mut rest = haystack.iter();
        needle.iter().all(|n| rest.any(|h| h == n))
    }

    proptest! {
        #[test]
        fn premium_never_includes_other_models(input in prop::collection::vec(arb_result(), 0..40)) {
            let finder = OpportunityFinder::default();
            let output = finder.find_premium_opportunities(&input);
            prop_assert!(output.iter().all(|r| r.model_used == PricingModel::BlackScholes));
        }

        #[test]
        fn premium_output_is_ordered_subset(input in prop::collection::vec(arb_result(), 0..40)) {
            let finder = OpportunityFinder::default();
            let output = finder.find_premium_opportunities(&input);
            prop_assert!(is_subsequence(&output, &input));
        }

        #[test]
        fn hedge_output_is_ordered_subset(input in prop::collection::vec(arb_result(), 0..40)) {
            let finder = OpportunityFinder::default();
            let output = finder.find_hedge_opportunities(&input);
            prop_assert!(is_subsequence(&output, &input));
        }

        #[test]
        fn screening_is_idempotent(input in prop::collection::vec(arb_result(), 0..40)) {
            let finder = OpportunityFinder::default();
            let premium = finder.find_premium_opportunities(&input);
            prop_assert_eq!(finder.find_premium_opportunities(&premium), premium.clone());
            let hedge = finder.find_hedge_opportunities(&input);
            prop_assert_eq!(finder.find_hedge_opportunities(&hedge), hedge.clone());
        }
    }
}
