// ABOUTME: Bounded retry wrapper for rate-limited external API calls
// ABOUTME: Linear backoff on the 429 signal only; every other error propagates immediately
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retry wrapper for external calls.
//!
//! [`call_with_retry`] is a pure resilience decorator: it never inspects or
//! transforms the payload. Only errors carrying the rate-limit signal
//! ([`AppError::is_rate_limited`]) are retried, with a linear backoff of
//! `attempt * initial_backoff_ms` (1s, 2s, ... with the defaults). Any other
//! failure, or exhaustion of the attempt budget, propagates the most recent
//! error unchanged.
//!
//! Each caller gets independent retry state; there is no shared rate-limit
//! budget across concurrent calls.

use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::errors::{AppError, ErrorCode};

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first. Must be at least 1.
    pub max_attempts: u32,
    /// Backoff unit in milliseconds; attempt `n` waits `n * initial_backoff_ms`
    pub initial_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 1000,
        }
    }
}

/// Invoke `operation`, retrying on rate-limit errors up to the configured
/// attempt budget.
///
/// # Errors
///
/// - `max_attempts == 0` is rejected with a configuration error before the
///   operation is ever invoked; the budget comes from server config, so a
///   budget that allows no attempts is a deployment bug, not a silent no-op
///   and not the client's fault.
/// - A non-rate-limit error from `operation` propagates immediately.
/// - A rate-limit error on the final attempt propagates unchanged.
pub async fn call_with_retry<T, F, Fut>(
    config: &RetryConfig,
    mut operation: F,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    if config.max_attempts == 0 {
        return Err(AppError::new(
            ErrorCode::ConfigInvalid,
            "retry budget must allow at least one attempt",
        ));
    }

    let mut attempt: u32 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_rate_limited() && attempt + 1 < config.max_attempts => {
                attempt += 1;
                let backoff_ms = config.initial_backoff_ms * u64::from(attempt);
                warn!(
                    attempt,
                    max_attempts = config.max_attempts,
                    backoff_ms,
                    "rate limit hit, retrying after backoff"
                );
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            }
            Err(err) => return Err(err),
        }
    }
}
