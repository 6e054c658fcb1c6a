//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod scan_opportunities;

pub use scan_opportunities::{ScanFailure, ScanOperation, ScanOpportunitiesUseCase, ScanReport};
