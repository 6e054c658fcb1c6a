//! Screening Value Objects

mod screener_config;

pub use screener_config::{DeltaRange, ScreenerConfig};
