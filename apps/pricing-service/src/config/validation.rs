//! Range validation for loaded configuration.

use std::collections::HashSet;

use super::{AppConfig, ConfigError, OptionGridConfig, ProviderConfig};
use crate::domain::screening::ScreenerConfig;

const MAX_PRIORITY: u8 = 10;
const MIN_TIMEOUT_MS: u64 = 1000;
const MIN_CACHE_TTL_SECS: u64 = 60;
const MAX_RETRIES: u32 = 10;
const MAX_MIN_DAYS_TO_EXPIRY: u32 = 365;

/// Validate a loaded configuration.
///
/// Fails on the first violation:
///
/// - at least one provider, with unique names
/// - enabled providers carry a non-empty `apiKey`
/// - `baseUrl` parses as an absolute URL
/// - numeric settings inside their documented ranges
/// - delta range ordered and inside `[0, 1]`
/// - non-empty, strictly positive option grid
///
/// # Errors
///
/// Returns `ConfigError::Validation` describing the offending field.
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.providers.is_empty() {
        return Err(invalid("providers must contain at least one entry"));
    }

    let mut seen = HashSet::new();
    for provider in &config.providers {
        if !seen.insert(provider.name.as_str()) {
            return Err(invalid(format!(
                "providers: duplicate name '{}'",
                provider.name
            )));
        }
        validate_provider(provider)?;
    }

    if config.cache_ttl < MIN_CACHE_TTL_SECS {
        return Err(invalid(format!(
            "cacheTtl must be at least {MIN_CACHE_TTL_SECS}, got {}",
            config.cache_ttl
        )));
    }
    if config.max_retries > MAX_RETRIES {
        return Err(invalid(format!(
            "maxRetries must be at most {MAX_RETRIES}, got {}",
            config.max_retries
        )));
    }
    if config.history_days == 0 {
        return Err(invalid("historyDays must be at least 1"));
    }
    if config.scan_interval_secs == 0 {
        return Err(invalid("scanIntervalSecs must be at least 1"));
    }

    validate_screener(&config.opportunity_finder)?;
    validate_grid(&config.option_parameters)
}

fn validate_provider(provider: &ProviderConfig) -> Result<(), ConfigError> {
    let name = &provider.name;

    if name.trim().is_empty() {
        return Err(invalid("providers: name must not be empty"));
    }
    if provider.enabled && provider.api_key.trim().is_empty() {
        return Err(invalid(format!("providers.{name}.apiKey is required")));
    }
    match reqwest::Url::parse(&provider.base_url) {
        Ok(url) if url.has_host() => {}
        _ => {
            return Err(invalid(format!(
                "providers.{name}.baseUrl must be a valid URL, got '{}'",
                provider.base_url
            )));
        }
    }
    if provider.priority > MAX_PRIORITY {
        return Err(invalid(format!(
            "providers.{name}.priority must be between 0 and {MAX_PRIORITY}, got {}",
            provider.priority
        )));
    }
    if provider.timeout_ms < MIN_TIMEOUT_MS {
        return Err(invalid(format!(
            "providers.{name}.timeout must be at least {MIN_TIMEOUT_MS}, got {}",
            provider.timeout_ms
        )));
    }
    if let Some(ttl) = provider.cache_ttl_secs
        && ttl < MIN_CACHE_TTL_SECS
    {
        return Err(invalid(format!(
            "providers.{name}.cacheTtl must be at least {MIN_CACHE_TTL_SECS}, got {ttl}"
        )));
    }
    if let Some(retries) = provider.retries
        && retries > MAX_RETRIES
    {
        return Err(invalid(format!(
            "providers.{name}.retries must be at most {MAX_RETRIES}, got {retries}"
        )));
    }

    Ok(())
}

fn validate_screener(screener: &ScreenerConfig) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&screener.volatility_threshold) {
        return Err(invalid(format!(
            "opportunityFinder.volatilityThreshold must be between 0 and 1, got {}",
            screener.volatility_threshold
        )));
    }
    if !(1..=MAX_MIN_DAYS_TO_EXPIRY).contains(&screener.min_days_to_expiry) {
        return Err(invalid(format!(
            "opportunityFinder.minDaysToExpiry must be between 1 and {MAX_MIN_DAYS_TO_EXPIRY}, got {}",
            screener.min_days_to_expiry
        )));
    }

    let range = screener.target_delta_range;
    let unit = 0.0..=1.0;
    if !unit.contains(&range.lower()) || !unit.contains(&range.upper()) {
        return Err(invalid(format!(
            "opportunityFinder.targetDeltaRange bounds must be between 0 and 1, got [{}, {}]",
            range.lower(),
            range.upper()
        )));
    }
    if range.lower() > range.upper() {
        return Err(invalid(format!(
            "opportunityFinder.targetDeltaRange must be ordered, got [{}, {}]",
            range.lower(),
            range.upper()
        )));
    }

    if !screener.hedge_min_gamma.is_finite() || screener.hedge_min_gamma < 0.0 {
        return Err(invalid(format!(
            "opportunityFinder.hedgeMinGamma must be non-negative, got {}",
            screener.hedge_min_gamma
        )));
    }
    if !screener.hedge_max_theta.is_finite() {
        return Err(invalid("opportunityFinder.hedgeMaxTheta must be finite"));
    }

    Ok(())
}

fn validate_grid(grid: &OptionGridConfig) -> Result<(), ConfigError> {
    if grid.strike_prices.is_empty() {
        return Err(invalid("optionParameters.strikePrices must not be empty"));
    }
    if let Some(bad) = grid.strike_prices.iter().find(|s| !is_positive(**s)) {
        return Err(invalid(format!(
            "optionParameters.strikePrices must be positive, got {bad}"
        )));
    }
    if grid.expirations.is_empty() {
        return Err(invalid("optionParameters.expirations must not be empty"));
    }
    if let Some(bad) = grid.expirations.iter().find(|t| !is_positive(**t)) {
        return Err(invalid(format!(
            "optionParameters.expirations must be positive, got {bad}"
        )));
    }

    for (field, value) in [
        ("volatility", grid.volatility),
        ("riskFreeRate", grid.risk_free_rate),
        ("dividendYield", grid.dividend_yield),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(invalid(format!(
                "optionParameters.{field} must be non-negative, got {value}"
            )));
        }
    }

    Ok(())
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation(message.into())
}
