//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//!
//! # Bounded Contexts
//!
//! - [`pricing`]: Option parameters, Greeks and pricing results
//! - [`screening`]: Premium and hedge opportunity screening

pub mod pricing;
pub mod screening;
