//! Bounded exponential-backoff retry for remote operations.
//!
//! One executor, applied uniformly to every remote write: the migration
//! step and the preference mirror both go through [`with_retry`] instead
//! of re-implementing backoff at each call site. The schedule is
//! deterministic (no jitter); each call's retry budget is independent, and
//! the wrapped operation must be safe to repeat — the executor knows
//! nothing about partial side effects.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Retry schedule: `delay = min(base_delay × 2^attempt, max_delay)`.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Retries after the initial attempt.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
        }
    }
}

/// Delay before the retry following failed attempt number `attempt`
/// (zero-based).
pub fn backoff_delay(policy: &RetryPolicy, attempt: u32) -> Duration {
    policy
        .base_delay
        .saturating_mul(2u32.saturating_pow(attempt))
        .min(policy.max_delay)
}

/// Runs `operation`, retrying failures on the policy's backoff schedule.
///
/// After `max_retries` exhausted retries the last error is returned, so
/// the operation is invoked at most `1 + max_retries` times.
pub async fn with_retry<T, E, F, Fut>(policy: &RetryPolicy, operation: F) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    with_retry_notify(policy, operation, |_, _| {}).await
}

/// [`with_retry`] with an observability hook: `on_retry(n, &err)` fires
/// before the sleep preceding retry number `n` (1-based).
pub async fn with_retry_notify<T, E, F, Fut, N>(
    policy: &RetryPolicy,
    mut operation: F,
    mut on_retry: N,
) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    N: FnMut(u32, &E),
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if attempt >= policy.max_retries {
                    return Err(e);
                }
                let delay = backoff_delay(policy, attempt);
                warn!(
                    "attempt {} failed, retrying in {delay:?}: {e}",
                    attempt + 1
                );
                on_retry(attempt + 1, &e);
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// Classifies an error as likely to succeed if retried, by its display
/// form: network/timeout faults, connection resets, gateway 5xx, and rate
/// limiting. Callers use this to decide whether to wrap an operation in
/// [`with_retry`] at all, or fail fast.
pub fn is_transient_error<E: Display>(error: &E) -> bool {
    const TRANSIENT_MARKERS: &[&str] = &[
        "timeout",
        "timed out",
        "network",
        "connection reset",
        "connection refused",
        "connection closed",
        "fetch failed",
        "failed to fetch",
        "502",
        "503",
        "504",
        "bad gateway",
        "service unavailable",
        "gateway timeout",
        "rate limit",
        "too many requests",
        "429",
    ];

    let message = error.to_string().to_lowercase();
    TRANSIENT_MARKERS.iter().any(|m| message.contains(m))
}
