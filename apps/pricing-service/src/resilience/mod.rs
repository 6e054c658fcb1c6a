//! Resilience patterns for external service calls.
//!
//! This module provides bounded retry with exponential backoff and
//! retryable/non-retryable error classification for provider calls.

mod retry;

pub use retry::{
    ErrorCategory, ExponentialBackoffCalculator, RetryClassify, RetryPolicy, categorize_status,
    is_retryable_status, with_retry,
};
