//! HTTP Provider Integration Tests
//!
//! Exercises `HttpPricingProvider` and `ProviderHttpClient` against a local
//! mock server: auth headers, error classification, retries and caching.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pricing_service::application::ports::{PricingProvider, ProviderError};
use pricing_service::config::ProviderConfig;
use pricing_service::domain::pricing::{OptionParameters, PricingModel};
use pricing_service::infrastructure::providers::{
    HttpPricingProvider, ProviderHttpClient, QueryParams,
};
use pricing_service::resilience::RetryPolicy;

const API_KEY: &str = "test-key";

fn config_for(server: &MockServer) -> ProviderConfig {
    ProviderConfig::new("polygon", API_KEY, format!("{}/v2", server.uri()))
}

fn provider_for(server: &MockServer, retries: u32) -> HttpPricingProvider {
    HttpPricingProvider::new(
        &config_for(server),
        PricingModel::BlackScholes,
        RetryPolicy::immediate(retries),
    )
    .unwrap()
}

fn greeks_json() -> serde_json::Value {
    json!({"delta": 0.45, "gamma": 0.12, "theta": -0.07, "vega": 0.31, "rho": 0.02})
}

#[tokio::test]
async fn sends_bearer_token_and_decodes_symbols() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/symbols"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"symbols": ["SPY", "QQQ"]})))
        .expect(1)
        .mount(&server)
        .await;

    let symbols = provider_for(&server, 0).list_symbols().await.unwrap();
    assert_eq!(symbols, vec!["SPY", "QQQ"]);
}

#[tokio::test]
async fn posts_parameters_and_builds_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/price"))
        .and(body_partial_json(json!({
            "underlyingPrice": 100.0,
            "strikePrice": 105.0,
            "timeToExpiration": 0.5,
            "volatility": 0.2
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "price": 4.25,
            "greeks": greeks_json(),
            "model": "black-scholes"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = OptionParameters::new(100.0, 105.0, 0.5).with_volatility(0.2);
    let result = provider_for(&server, 0).calculate_price(params).await.unwrap();

    assert_eq!(result.price, 4.25);
    assert_eq!(result.greeks.vega, 0.31);
    assert_eq!(result.parameters, params);
    assert_eq!(result.model_used, PricingModel::BlackScholes);
}

#[tokio::test]
async fn model_mismatch_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "price": 1.0,
            "greeks": greeks_json(),
            "model": "binomial"
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server, 0)
        .calculate_price(OptionParameters::new(100.0, 100.0, 1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Decode { .. }));
}

#[tokio::test]
async fn retries_service_unavailable_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/history"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/history"))
        .and(query_param("symbol", "SPY"))
        .and(query_param("days", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"prices": [1.0, 2.0, 3.0]})))
        .expect(1)
        .mount(&server)
        .await;

    let prices = provider_for(&server, 3)
        .get_historical_data("SPY", 3)
        .await
        .unwrap();
    assert_eq!(prices, vec![1.0, 2.0, 3.0]);
}

#[tokio::test]
async fn exhausted_retries_surface_last_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/symbols"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"message": "maintenance"})))
        .expect(3)
        .mount(&server)
        .await;

    let err = provider_for(&server, 2).list_symbols().await.unwrap_err();
    let ProviderError::Pricing(pricing) = err else {
        panic!("expected pricing error, got {err:?}");
    };
    assert_eq!(pricing.provider, "polygon");
    assert_eq!(pricing.message, "maintenance");
    assert_eq!(pricing.code.as_deref(), Some("503"));
    assert_eq!(pricing.to_string(), "[polygon] maintenance");
}

#[tokio::test]
async fn not_found_history_is_unavailable_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/history"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider_for(&server, 3)
        .get_historical_data("ZZZZ", 5)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ProviderError::DataUnavailable {
            provider: "polygon".to_string(),
            symbol: "ZZZZ".to_string(),
        }
    );
}

#[tokio::test]
async fn empty_history_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"prices": []})))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider_for(&server, 3)
        .get_historical_data("ZZZZ", 5)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ProviderError::DataUnavailable {
            provider: "polygon".to_string(),
            symbol: "ZZZZ".to_string(),
        }
    );
}

#[tokio::test]
async fn client_error_extracts_message_and_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/price"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "strike out of range"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = provider_for(&server, 3)
        .calculate_price(OptionParameters::new(100.0, 100.0, 1.0))
        .await
        .unwrap_err();
    let ProviderError::Pricing(pricing) = err else {
        panic!("expected pricing error, got {err:?}");
    };
    assert_eq!(pricing.message, "strike out of range");
    assert_eq!(pricing.code.as_deref(), Some("400"));
}

#[tokio::test]
async fn error_without_body_falls_back_to_status_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/symbols"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = provider_for(&server, 0).list_symbols().await.unwrap_err();
    let ProviderError::Pricing(pricing) = err else {
        panic!("expected pricing error, got {err:?}");
    };
    assert_eq!(pricing.message, "Request failed with status code 401");
    assert_eq!(pricing.code.as_deref(), Some("401"));
}

#[tokio::test]
async fn connection_failure_is_retried_without_code() {
    // Nothing listens on the discard port
    let config = ProviderConfig::new("polygon", API_KEY, "http://127.0.0.1:9/v2");
    let provider =
        HttpPricingProvider::new(&config, PricingModel::BlackScholes, RetryPolicy::immediate(1))
            .unwrap();

    let err = provider.list_symbols().await.unwrap_err();
    let ProviderError::Pricing(pricing) = err else {
        panic!("expected pricing error, got {err:?}");
    };
    assert_eq!(pricing.code, None);
    assert!(!pricing.message.is_empty());
}

#[tokio::test]
async fn undecodable_body_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/symbols"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider_for(&server, 3).list_symbols().await.unwrap_err();
    assert!(matches!(err, ProviderError::Decode { .. }));
}

#[tokio::test]
async fn history_length_mismatch_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"prices": [1.0]})))
        .mount(&server)
        .await;

    let err = provider_for(&server, 0)
        .get_historical_data("SPY", 3)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Decode { .. }));
}

#[tokio::test]
async fn history_is_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"prices": [10.0, 11.0]})))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, 0);
    let first = provider.get_historical_data("SPY", 2).await.unwrap();
    let second = provider.get_historical_data("SPY", 2).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn repeated_query_keys_are_not_indexed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/quotes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = ProviderHttpClient::new(&config_for(&server)).unwrap();
    let query = QueryParams::new()
        .with("symbol", "SPY")
        .with_all("field", ["bid", "ask"]);
    let _: serde_json::Value = client.get("/quotes", &query).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), Some("symbol=SPY&field=bid&field=ask"));
}
