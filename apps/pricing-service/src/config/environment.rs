//! Configuration assembled from environment variables.

use std::collections::HashMap;
use std::str::FromStr;

use serde::de::DeserializeOwned;

use super::{
    AppConfig, ConfigError, ObservabilityConfig, OptionGridConfig, ProviderConfig,
    default_history_days, default_max_retries, default_scan_interval_secs,
    providers::default_cache_ttl_secs, validate_config,
};
use crate::domain::screening::{DeltaRange, ScreenerConfig};

const ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co/query";
const POLYGON_URL: &str = "https://api.polygon.io/v2";

/// Build the built-in configuration from an environment map.
///
/// Two providers are always defined: `alpha_vantage` (priority 1) and
/// `polygon` (priority 2). Unset or empty variables fall back to defaults.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` when a variable cannot be parsed and
/// `ConfigError::Validation` when the result is out of range, including a
/// missing API key for an enabled provider.
pub fn load_config_from_env(env: &HashMap<String, String>) -> Result<AppConfig, ConfigError> {
    let cache_ttl = parse_or(env, "PRICING_CACHE_TTL", default_cache_ttl_secs())?;

    let alpha_vantage = ProviderConfig {
        enabled: parse_or(env, "ALPHA_VANTAGE_ENABLED", true)?,
        ..ProviderConfig::new(
            "alpha_vantage",
            string_or_empty(env, "ALPHA_VANTAGE_API_KEY"),
            ALPHA_VANTAGE_URL,
        )
        .with_priority(1)
    };
    let polygon = ProviderConfig {
        enabled: parse_or(env, "POLYGON_ENABLED", true)?,
        ..ProviderConfig::new("polygon", string_or_empty(env, "POLYGON_API_KEY"), POLYGON_URL)
            .with_priority(2)
    };

    let defaults = ScreenerConfig::default();
    let opportunity_finder = ScreenerConfig {
        volatility_threshold: parse_or(
            env,
            "OPPORTUNITY_VOLATILITY_THRESHOLD",
            defaults.volatility_threshold,
        )?,
        min_days_to_expiry: days_or(env, "OPPORTUNITY_MIN_DAYS", defaults.min_days_to_expiry)?,
        target_delta_range: DeltaRange(
            parse_or(
                env,
                "OPPORTUNITY_DELTA_MIN",
                defaults.target_delta_range.lower(),
            )?,
            parse_or(
                env,
                "OPPORTUNITY_DELTA_MAX",
                defaults.target_delta_range.upper(),
            )?,
        ),
        hedge_min_gamma: parse_or(env, "OPPORTUNITY_HEDGE_MIN_GAMMA", defaults.hedge_min_gamma)?,
        hedge_max_days_to_expiry: days_or(
            env,
            "OPPORTUNITY_HEDGE_MAX_DAYS",
            defaults.hedge_max_days_to_expiry,
        )?,
        hedge_max_theta: parse_or(env, "OPPORTUNITY_HEDGE_MAX_THETA", defaults.hedge_max_theta)?,
    };

    let grid = OptionGridConfig::default();
    let option_parameters = OptionGridConfig {
        strike_prices: json_or(env, "STRIKE_PRICES", grid.strike_prices)?,
        expirations: json_or(env, "EXPIRATIONS", grid.expirations)?,
        volatility: parse_or(env, "VOLATILITY", grid.volatility)?,
        risk_free_rate: parse_or(env, "RISK_FREE_RATE", grid.risk_free_rate)?,
        dividend_yield: parse_or(env, "DIVIDEND_YIELD", grid.dividend_yield)?,
    };

    let observability = ObservabilityConfig {
        metrics_addr: match lookup(env, "METRICS_ADDR") {
            Some(raw) => Some(parse_value("METRICS_ADDR", raw)?),
            None => None,
        },
        ..ObservabilityConfig::default()
    };

    let config = AppConfig {
        providers: vec![alpha_vantage, polygon],
        cache_ttl,
        max_retries: parse_or(env, "MAX_RETRIES", default_max_retries())?,
        default_model: parse_or(env, "DEFAULT_MODEL", Default::default())?,
        opportunity_finder,
        option_parameters,
        history_days: parse_or(env, "HISTORY_DAYS", default_history_days())?,
        scan_interval_secs: parse_or(env, "SCAN_INTERVAL_SECS", default_scan_interval_secs())?,
        observability,
    };

    validate_config(&config)?;
    Ok(config)
}

fn lookup<'a>(env: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    env.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn string_or_empty(env: &HashMap<String, String>, key: &str) -> String {
    lookup(env, key).unwrap_or_default().to_string()
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_or<T>(env: &HashMap<String, String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(env, key).map_or(Ok(default), |raw| parse_value(key, raw))
}

/// Whole days; a fractional value is truncated (`14.5` reads as 14).
fn days_or(env: &HashMap<String, String>, key: &str, default: u32) -> Result<u32, ConfigError> {
    let Some(raw) = lookup(env, key) else {
        return Ok(default);
    };
    let days: f64 = parse_value(key, raw)?;
    if !days.is_finite() || days < 0.0 || days > f64::from(u32::MAX) {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
            reason: "expected a non-negative number of days".to_string(),
        });
    }
    Ok(days.trunc() as u32)
}

fn json_or<T>(env: &HashMap<String, String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    lookup(env, key).map_or(Ok(default), |raw| {
        serde_json::from_str(raw).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
            reason: e.to_string(),
        })
    })
}
