//! Bounded retry with exponential backoff for provider calls.
//!
//! [`with_retry`] re-invokes a fallible async operation until it succeeds,
//! fails with a non-retryable error, or runs out of retries. A policy with
//! `max_retries = N` makes at most `N + 1` invocations.
//!
//! # Retryable Errors
//!
//! | Retryable | Non-Retryable |
//! |-----------|---------------|
//! | Network timeouts, connection failures | HTTP 400 (Bad Request) |
//! | HTTP 408 (Request Timeout) | HTTP 401/403 (Auth Errors) |
//! | HTTP 429 (Rate Limited) | HTTP 404 (Not Found) |
//! | HTTP 5xx | Parameter validation failures |
//! | | Unknown symbol / no data |
//!
//! # Example
//!
//! ```rust,ignore
//! use pricing_service::resilience::{RetryPolicy, with_retry};
//!
//! let policy = RetryPolicy::with_max_retries(3);
//! let prices = with_retry(&policy, "polygon", || client.get("/history", &query)).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::observability::record_provider_retry;

/// Retry policy for provider calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Retries after the first attempt (default: 3).
    pub max_retries: u32,
    /// Initial backoff duration (default: 100ms).
    pub initial_backoff: Duration,
    /// Maximum backoff duration (default: 10s).
    pub max_backoff: Duration,
    /// Backoff multiplier for exponential growth (default: 2.0).
    pub backoff_multiplier: f64,
    /// Jitter factor for randomization (default: 0.2 = ±20%).
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            jitter_factor: 0.2,
        }
    }
}

impl RetryPolicy {
    /// Default backoff settings with a custom retry count.
    #[must_use]
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// Retry without waiting between attempts.
    #[must_use]
    pub const fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            backoff_multiplier: 1.0,
            jitter_factor: 0.0,
        }
    }
}

/// Calculator for exponential backoff with jitter.
#[derive(Debug)]
pub struct ExponentialBackoffCalculator {
    current_attempt: u32,
    max_attempts: u32,
    initial_backoff_ms: u64,
    max_backoff_ms: u64,
    backoff_multiplier: f64,
    jitter_factor: f64,
}

impl ExponentialBackoffCalculator {
    /// Create a new backoff calculator from a retry policy.
    #[must_use]
    pub const fn new(policy: &RetryPolicy) -> Self {
        Self {
            current_attempt: 0,
            max_attempts: policy.max_retries,
            initial_backoff_ms: policy.initial_backoff.as_millis() as u64,
            max_backoff_ms: policy.max_backoff.as_millis() as u64,
            backoff_multiplier: policy.backoff_multiplier,
            jitter_factor: policy.jitter_factor,
        }
    }

    /// Get the next backoff duration with jitter.
    ///
    /// Returns `None` once every retry has been handed out.
    pub fn next_backoff(&mut self) -> Option<Duration> {
        if self.current_attempt >= self.max_attempts {
            return None;
        }

        let base_backoff_ms = self.calculate_base_backoff_ms();
        let jittered_ms = self.apply_jitter(base_backoff_ms);
        let capped_ms = jittered_ms.min(self.max_backoff_ms);

        self.current_attempt += 1;

        Some(Duration::from_millis(capped_ms))
    }

    fn calculate_base_backoff_ms(&self) -> u64 {
        let multiplier = self.backoff_multiplier.powi(self.current_attempt as i32);
        let backoff = (self.initial_backoff_ms as f64 * multiplier) as u64;
        backoff.min(self.max_backoff_ms)
    }

    /// Random value in `[backoff * (1 - jitter), backoff * (1 + jitter)]`.
    fn apply_jitter(&self, backoff_ms: u64) -> u64 {
        if backoff_ms == 0 || self.jitter_factor <= 0.0 {
            return backoff_ms;
        }

        let mut rng = rand::rng();
        let jitter_range = backoff_ms as f64 * self.jitter_factor;
        let min = (backoff_ms as f64 - jitter_range).max(0.0);
        let max = backoff_ms as f64 + jitter_range;

        rng.random_range(min..=max) as u64
    }

    /// Retries handed out so far.
    #[must_use]
    pub const fn current_attempt(&self) -> u32 {
        self.current_attempt
    }

    /// Check if more retries are available.
    #[must_use]
    pub const fn has_remaining_attempts(&self) -> bool {
        self.current_attempt < self.max_attempts
    }
}

/// Error categories for retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transient failure, worth another attempt.
    Retryable,
    /// Permanent failure, surface immediately.
    NonRetryable,
}

/// Errors that know whether they are worth retrying.
pub trait RetryClassify {
    /// Category of this error.
    fn category(&self) -> ErrorCategory;
}

/// Check if an HTTP status code is retryable.
#[must_use]
pub const fn is_retryable_status(status_code: u16) -> bool {
    matches!(status_code, 408 | 429 | 500..=599)
}

/// Categorize an HTTP status for retry decisions.
#[must_use]
pub const fn categorize_status(status_code: u16) -> ErrorCategory {
    if is_retryable_status(status_code) {
        ErrorCategory::Retryable
    } else {
        ErrorCategory::NonRetryable
    }
}

/// Run `operation` with bounded retries.
///
/// Non-retryable errors are returned after the first failure. Retryable
/// errors are retried up to `policy.max_retries` times with backoff; the
/// last error is returned when retries run out. Each attempt calls
/// `operation` afresh, so no request state is shared between attempts.
pub async fn with_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut operation: F,
) -> Result<T, E>
where
    E: RetryClassify + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut backoff = ExponentialBackoffCalculator::new(policy);

    loop {
        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        if error.category() == ErrorCategory::NonRetryable {
            return Err(error);
        }

        let Some(delay) = backoff.next_backoff() else {
            tracing::warn!(
                label,
                error = %error,
                retries = backoff.current_attempt(),
                "Retries exhausted"
            );
            return Err(error);
        };

        tracing::warn!(
            label,
            error = %error,
            attempt = backoff.current_attempt(),
            delay_ms = delay.as_millis() as u64,
            "Retryable error, retrying"
        );
        record_provider_retry(label);

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
