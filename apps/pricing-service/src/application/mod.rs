//! Application Layer
//!
//! The application layer orchestrates domain logic through use cases.
//! It defines:
//!
//! - **Ports**: The provider contract adapters implement
//! - **Use Cases**: Scanning providers for opportunities

pub mod ports;
pub mod use_cases;

pub use ports::*;
pub use use_cases::*;
