//! Pricing Value Objects

mod greeks;
mod option_parameters;
mod pricing_model;
mod pricing_result;

pub use greeks::Greeks;
pub use option_parameters::{DAYS_PER_YEAR, OptionParameters};
pub use pricing_model::PricingModel;
pub use pricing_result::PricingResult;
