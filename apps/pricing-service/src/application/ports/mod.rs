//! Application Ports (Driven)
//!
//! Ports define interfaces for interacting with external systems.
//! - **Driven Ports** (Secondary/Outbound): How our application uses external systems

mod pricing_provider_port;

pub(crate) use pricing_provider_port::validate_history_request;
pub use pricing_provider_port::{PricingError, PricingProvider, ProviderError};
