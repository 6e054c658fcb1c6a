//! Opportunity Screening Bounded Context
//!
//! Classifies batches of pricing results into actionable subsets:
//! - Premium opportunities (options attractive for selling time value)
//! - Hedge opportunities (options attractive for offsetting gamma risk)
//!
//! Screening is a pure function of its inputs and the thresholds supplied
//! at construction. No I/O, no suspension.

pub mod services;
pub mod value_objects;

pub use services::OpportunityFinder;
pub use value_objects::{DeltaRange, ScreenerConfig};
