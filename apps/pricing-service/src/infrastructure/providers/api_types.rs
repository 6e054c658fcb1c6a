//! Pricing API request and response types.
//!
//! Requests reuse the domain `OptionParameters`, which already serialize in
//! the wire format.

use serde::{Deserialize, Serialize};

use crate::domain::pricing::{Greeks, PricingModel};

/// Response to `POST /price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResponse {
    /// Theoretical option price.
    pub price: f64,
    /// Sensitivities at the priced point.
    pub greeks: Greeks,
    /// Model the upstream used, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<PricingModel>,
}

/// Response to `GET /history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// Daily observations, oldest first.
    pub prices: Vec<f64>,
}

/// Response to `GET /symbols`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolsResponse {
    /// Tradable symbols.
    pub symbols: Vec<String>,
}

/// Error body returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_response_without_model() {
        let json = r#"{"price": 4.2, "greeks": {"delta": 0.5, "gamma": 0.1, "theta": -0.05, "vega": 0.2, "rho": 0.01}}"#;
        let resp: PriceResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.price, 4.2);
        assert_eq!(resp.greeks.delta, 0.5);
        assert!(resp.model.is_none());
    }

    #[test]
    fn test_price_response_with_model() {
        let json = r#"{"price": 1.0, "greeks": {"delta": 0.4, "gamma": 0.1, "theta": -0.1, "vega": 0.3, "rho": 0.0}, "model": "binomial"}"#;
        let resp: PriceResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.model, Some(PricingModel::Binomial));
    }

    #[test]
    fn test_error_response_tolerates_missing_message() {
        let resp: ApiErrorResponse = serde_json::from_str(r#"{"error": "x"}"#).unwrap();
        assert!(resp.message.is_none());
    }
}
