//! Infrastructure Layer
//!
//! Driven adapters implementing the ports defined in the application layer:
//!
//! - `providers/`: pricing and market-data providers (placeholder and HTTP)

pub mod providers;
