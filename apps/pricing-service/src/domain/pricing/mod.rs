//! Pricing Bounded Context
//!
//! Shared value types exchanged between providers, the orchestration
//! use case and the opportunity screener:
//! - Option parameters (inputs to a pricing request)
//! - Greeks and the pricing result envelope (outputs)
//! - The closed set of pricing models

pub mod errors;
pub mod value_objects;

pub use errors::ParameterError;
pub use value_objects::{Greeks, OptionParameters, PricingModel, PricingResult};
