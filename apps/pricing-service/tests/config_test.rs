//! Configuration Loading Integration Tests
//!
//! Loads YAML files from disk and the built-in environment configuration,
//! then wires the result into providers.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::io::Write;

use pricing_service::config::{ConfigError, ProviderKind, load_config, load_config_from_env};
use pricing_service::domain::pricing::PricingModel;
use pricing_service::infrastructure::providers::build_providers;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn write_yaml(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

const YAML: &str = r"
providers:
  - name: alpha_vantage
    apiKey: ${ALPHA_VANTAGE_API_KEY}
    baseUrl: https://www.alphavantage.co/query
    priority: 1
  - name: polygon
    apiKey: ${POLYGON_API_KEY:-unused}
    baseUrl: ${POLYGON_URL:-https://api.polygon.io/v2}
    priority: 2
    kind: http
    model: binomial
maxRetries: ${MAX_RETRIES:-2}
";

#[test]
fn loads_yaml_file_with_interpolation() {
    let file = write_yaml(YAML);
    let path = file.path().to_str().unwrap();

    let config = load_config(path, &env(&[("ALPHA_VANTAGE_API_KEY", "av-key")])).unwrap();

    assert_eq!(config.providers[0].api_key, "av-key");
    assert_eq!(config.providers[1].api_key, "unused");
    assert_eq!(config.providers[1].base_url, "https://api.polygon.io/v2");
    assert_eq!(config.providers[1].kind, ProviderKind::Http);
    assert_eq!(config.max_retries, 2);

    let providers = build_providers(&config).unwrap();
    assert_eq!(providers.len(), 2);
    assert_eq!(providers[1].model(), PricingModel::Binomial);
}

#[test]
fn yaml_application_cache_ttl_applies_to_providers_without_one() {
    let file = write_yaml(
        r"
providers:
  - name: alpha_vantage
    apiKey: a
    baseUrl: https://www.alphavantage.co/query
  - name: polygon
    apiKey: p
    baseUrl: https://api.polygon.io/v2
    cacheTtl: 900
    kind: http
cacheTtl: 120
",
    );
    let path = file.path().to_str().unwrap();

    let config = load_config(path, &env(&[])).unwrap();

    assert_eq!(config.cache_ttl, 120);
    assert_eq!(config.providers[0].cache_ttl_secs, None);
    assert_eq!(config.provider_cache_ttl(&config.providers[0]), 120);
    assert_eq!(config.provider_cache_ttl(&config.providers[1]), 900);
    assert_eq!(build_providers(&config).unwrap().len(), 2);
}

#[test]
fn yaml_missing_required_key_fails() {
    let file = write_yaml(YAML);
    let path = file.path().to_str().unwrap();

    let Err(err) = load_config(path, &env(&[])) else {
        panic!("expected validation error");
    };
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("alpha_vantage.apiKey")));
}

#[test]
fn yaml_out_of_range_value_fails() {
    let file = write_yaml(YAML);
    let path = file.path().to_str().unwrap();

    let Err(err) = load_config(
        path,
        &env(&[("ALPHA_VANTAGE_API_KEY", "k"), ("MAX_RETRIES", "42")]),
    ) else {
        panic!("expected validation error");
    };
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("maxRetries")));
}

#[test]
fn malformed_yaml_is_parse_error() {
    let file = write_yaml("providers: [unclosed");
    let path = file.path().to_str().unwrap();

    let Err(err) = load_config(path, &env(&[])) else {
        panic!("expected parse error");
    };
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn environment_config_builds_two_simple_providers() {
    let config = load_config_from_env(&env(&[
        ("ALPHA_VANTAGE_API_KEY", "a"),
        ("POLYGON_API_KEY", "p"),
    ]))
    .unwrap();

    let providers = build_providers(&config).unwrap();
    let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["alpha_vantage", "polygon"]);
    assert!(providers.iter().all(|p| p.model() == PricingModel::BlackScholes));
}

#[test]
fn all_providers_disabled_yields_none() {
    let config = load_config_from_env(&env(&[
        ("ALPHA_VANTAGE_ENABLED", "false"),
        ("POLYGON_ENABLED", "false"),
    ]))
    .unwrap();

    assert_eq!(config.enabled_providers().count(), 0);
    assert!(build_providers(&config).unwrap().is_empty());
}
