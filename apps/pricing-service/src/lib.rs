// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Pricing Service - Rust Core Library
//!
//! Options pricing data service: collects pricing results from pluggable
//! providers and screens them for premium and hedge opportunities.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure business logic
//!   - `pricing`: Option parameters, Greeks, pricing results, models
//!   - `screening`: Opportunity finder and its thresholds
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `PricingProvider` contract and provider errors
//!   - `use_cases`: `ScanOpportunitiesUseCase`
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `providers`: Placeholder and HTTP providers, provider factory
//!
//! ## Cross-cutting
//!
//! - `config`: YAML and environment configuration with validation
//! - `resilience`: Error classification and bounded retry
//! - `observability`: Logging and Prometheus metrics

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting Concerns
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Logging and metrics.
pub mod observability;

/// Retry and error classification.
pub mod resilience;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::ports::{PricingError, PricingProvider, ProviderError};
pub use application::use_cases::{ScanFailure, ScanOpportunitiesUseCase, ScanReport};
pub use config::{AppConfig, ConfigError, ProviderConfig};
pub use domain::pricing::{Greeks, OptionParameters, PricingModel, PricingResult};
pub use domain::screening::{OpportunityFinder, ScreenerConfig};
pub use infrastructure::providers::{HttpPricingProvider, SimplePricingProvider, build_providers};
