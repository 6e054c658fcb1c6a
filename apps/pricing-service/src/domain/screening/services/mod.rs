//! Screening Domain Services

mod opportunity_finder;

pub use opportunity_finder::OpportunityFinder;
