//! Scan Opportunities Use Case
//!
//! Drives every provider through symbol discovery, history and pricing,
//! then screens the combined results. Failures are isolated per symbol:
//! one bad symbol never aborts the scan.

use std::fmt;
use std::sync::Arc;

use futures::future::join_all;

use crate::application::ports::{PricingProvider, ProviderError};
use crate::config::OptionGridConfig;
use crate::domain::pricing::PricingResult;
use crate::domain::screening::OpportunityFinder;
use crate::observability::{record_opportunities, record_scan_failure};

/// Provider operation a scan failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanOperation {
    /// `list_symbols`.
    ListSymbols,
    /// `get_historical_data`.
    History,
    /// `calculate_price`.
    Price,
}

impl ScanOperation {
    /// Label used in logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ListSymbols => "list_symbols",
            Self::History => "history",
            Self::Price => "price",
        }
    }
}

impl fmt::Display for ScanOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider or symbol skipped during a scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanFailure {
    /// Provider name.
    pub provider: String,
    /// Symbol, absent when symbol listing failed.
    pub symbol: Option<String>,
    /// Operation that failed.
    pub operation: ScanOperation,
    /// Underlying error.
    pub error: ProviderError,
}

/// Outcome of one scan.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Every pricing result, grouped by provider in priority order.
    pub results: Vec<PricingResult>,
    /// Results passing the premium screen.
    pub premium: Vec<PricingResult>,
    /// Results passing the hedge screen.
    pub hedge: Vec<PricingResult>,
    /// Skipped providers and symbols.
    pub failures: Vec<ScanFailure>,
}

impl ScanReport {
    /// Whether every provider and symbol was scanned.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Default)]
struct ProviderScan {
    results: Vec<PricingResult>,
    failures: Vec<ScanFailure>,
}

/// Use case for scanning providers for premium and hedge opportunities.
pub struct ScanOpportunitiesUseCase {
    providers: Vec<Arc<dyn PricingProvider>>,
    finder: OpportunityFinder,
    grid: OptionGridConfig,
    history_days: u32,
}

impl ScanOpportunitiesUseCase {
    /// Create a new ScanOpportunitiesUseCase.
    ///
    /// Providers are ordered by ascending priority; ties keep their given order.
    #[must_use]
    pub fn new(
        mut providers: Vec<Arc<dyn PricingProvider>>,
        finder: OpportunityFinder,
        grid: OptionGridConfig,
        history_days: u32,
    ) -> Self {
        providers.sort_by_key(|p| p.priority());
        Self {
            providers,
            finder,
            grid,
            history_days,
        }
    }

    /// Provider names in scan order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Execute one full scan.
    pub async fn execute(&self) -> ScanReport {
        let scans = join_all(
            self.providers
                .iter()
                .map(|provider| self.scan_provider(provider.as_ref())),
        )
        .await;

        let mut report = ScanReport::default();
        for scan in scans {
            report.results.extend(scan.results);
            report.failures.extend(scan.failures);
        }

        report.premium = self.finder.find_premium_opportunities(&report.results);
        report.hedge = self.finder.find_hedge_opportunities(&report.results);

        record_opportunities("premium", report.premium.len());
        record_opportunities("hedge", report.hedge.len());

        tracing::info!(
            providers = self.providers.len(),
            results = report.results.len(),
            premium = report.premium.len(),
            hedge = report.hedge.len(),
            failures = report.failures.len(),
            "Scan complete"
        );

        report
    }

    async fn scan_provider(&self, provider: &dyn PricingProvider) -> ProviderScan {
        let mut scan = ProviderScan::default();

        let symbols = match provider.list_symbols().await {
            Ok(symbols) => symbols,
            Err(error) => {
                scan.failures
                    .push(failure(provider, None, ScanOperation::ListSymbols, error));
                return scan;
            }
        };

        tracing::debug!(provider = provider.name(), symbols = symbols.len(), "Scanning provider");

        for symbol in symbols {
            match self.scan_symbol(provider, &symbol).await {
                Ok(results) => scan.results.extend(results),
                Err((operation, error)) => {
                    scan.failures
                        .push(failure(provider, Some(symbol), operation, error));
                }
            }
        }

        scan
    }

    /// Price the whole grid for one symbol; any failure discards the symbol.
    async fn scan_symbol(
        &self,
        provider: &dyn PricingProvider,
        symbol: &str,
    ) -> Result<Vec<PricingResult>, (ScanOperation, ProviderError)> {
        let history = provider
            .get_historical_data(symbol, self.history_days)
            .await
            .map_err(|e| (ScanOperation::History, e))?;

        let Some(&underlying_price) = history.last() else {
            return Err((
                ScanOperation::History,
                ProviderError::DataUnavailable {
                    provider: provider.name().to_string(),
                    symbol: symbol.to_string(),
                },
            ));
        };

        let priced = join_all(
            self.grid
                .parameters_for(underlying_price)
                .into_iter()
                .map(|params| provider.calculate_price(params)),
        )
        .await;

        priced
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| (ScanOperation::Price, e))
    }
}

fn failure(
    provider: &dyn PricingProvider,
    symbol: Option<String>,
    operation: ScanOperation,
    error: ProviderError,
) -> ScanFailure {
    tracing::warn!(
        provider = provider.name(),
        symbol = symbol.as_deref().unwrap_or("-"),
        operation = %operation,
        error = %error,
        "Scan step failed, skipping"
    );
    record_scan_failure(provider.name(), operation.as_str());

    ScanFailure {
        provider: provider.name().to_string(),
        symbol,
        operation,
        error,
    }
}
