//! Pricing Errors

use thiserror::Error;

/// Errors raised when option parameters fail validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParameterError {
    /// A mandatory field is zero, negative or not finite.
    #[error("{field} must be a positive number, got {value}")]
    NotPositive {
        /// Field name.
        field: &'static str,
        /// Offending value, formatted.
        value: String,
    },

    /// Unknown pricing model identifier.
    #[error("Unknown pricing model: {0}")]
    UnknownModel(String),
}
