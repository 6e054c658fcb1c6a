//! Pricing Service Binary
//!
//! Loads configuration, builds the enabled providers and scans them for
//! opportunities at a fixed interval until interrupted.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin pricing-service
//! ```
//!
//! # Environment Variables
//!
//! ## Required (for enabled providers)
//! - `ALPHA_VANTAGE_API_KEY`: Alpha Vantage API key
//! - `POLYGON_API_KEY`: Polygon API key
//!
//! ## Optional
//! - `PRICING_CONFIG`: YAML config path; replaces the variables below
//! - `ALPHA_VANTAGE_ENABLED` / `POLYGON_ENABLED`: toggle providers (default: true)
//! - `PRICING_CACHE_TTL`, `MAX_RETRIES`, `DEFAULT_MODEL`
//! - `OPPORTUNITY_*`: screener thresholds
//! - `STRIKE_PRICES`, `EXPIRATIONS` (JSON arrays), `VOLATILITY`,
//!   `RISK_FREE_RATE`, `DIVIDEND_YIELD`
//! - `HISTORY_DAYS`, `SCAN_INTERVAL_SECS`
//! - `METRICS_ADDR`: Prometheus listener (disabled when unset)
//! - `RUST_LOG`: Log filter (default: `pricing_service=info`)
//!
//! # Exit Codes
//!
//! - `0`: clean shutdown
//! - `1`: invalid configuration or no enabled providers

use std::collections::HashMap;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use pricing_service::application::use_cases::{ScanOpportunitiesUseCase, ScanReport};
use pricing_service::config::{AppConfig, ConfigError, load_config, load_config_from_env};
use pricing_service::domain::screening::OpportunityFinder;
use pricing_service::infrastructure::providers::build_providers;
use pricing_service::observability::{init_metrics, init_tracing};
use tokio::signal;

#[tokio::main]
async fn main() -> ExitCode {
    load_dotenv();
    let env: HashMap<String, String> = std::env::vars().collect();

    let config = match load(&env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to start service: {e}");
            return ExitCode::FAILURE;
        }
    };

    if config.enabled_providers().next().is_none() {
        eprintln!("Failed to start service: no providers enabled");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Failed to start service: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Load configuration from `PRICING_CONFIG` if set, otherwise from the environment.
fn load(env: &HashMap<String, String>) -> Result<AppConfig, ConfigError> {
    match env.get("PRICING_CONFIG").filter(|p| !p.trim().is_empty()) {
        Some(path) => load_config(path, env),
        None => load_config_from_env(env),
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    init_tracing(&config.observability).context("initializing logging")?;

    if let Some(addr) = config.observability.metrics_addr {
        init_metrics(addr).context("starting metrics exporter")?;
    }

    let providers = build_providers(&config).context("building providers")?;
    tracing::info!(
        providers = providers.len(),
        "Starting options pricing service"
    );

    let use_case = ScanOpportunitiesUseCase::new(
        providers,
        OpportunityFinder::new(config.opportunity_finder.clone()),
        config.option_parameters.clone(),
        config.history_days,
    );
    tracing::info!(order = ?use_case.provider_names(), "Provider scan order");

    let mut ticker = tokio::time::interval(Duration::from_secs(config.scan_interval_secs));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    tracing::info!(
        interval_secs = config.scan_interval_secs,
        "Service ready - press Ctrl+C to exit"
    );

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let report = use_case.execute().await;
                log_report(&report);
            }
            () = &mut shutdown => {
                break;
            }
        }
    }

    tracing::info!("Pricing service stopped");
    Ok(())
}

fn log_report(report: &ScanReport) {
    for result in &report.premium {
        tracing::info!(
            strike = result.parameters.strike_price,
            underlying = result.parameters.underlying_price,
            days = result.days_to_expiration(),
            delta = result.greeks.delta,
            vega = result.greeks.vega,
            "Premium opportunity"
        );
    }
    for result in &report.hedge {
        tracing::info!(
            strike = result.parameters.strike_price,
            underlying = result.parameters.underlying_price,
            days = result.days_to_expiration(),
            gamma = result.greeks.gamma,
            theta = result.greeks.theta,
            "Hedge opportunity"
        );
    }
}

/// Load `.env` from the working directory or the nearest ancestor.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Wait for Ctrl+C or SIGTERM.
///
/// If a handler cannot be installed, that signal source never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
