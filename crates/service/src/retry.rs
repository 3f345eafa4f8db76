//! Bounded retry with exponential backoff for transient transport failures.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use pantry_core::TransportError;

/// Retry configuration.
///
/// Attempt `k` (0-based) that fails transiently waits `base_delay * 2^k`
/// before the next try; `max_attempts` caps the number of physical requests.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    /// Cap on any single backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            ..Self::default()
        }
    }

    /// Backoff delay after a failed attempt `k` (0-based): `base * 2^k`,
    /// capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Per-call timeout that grows with batch size: touching more catalog
/// records takes longer, so larger batches get a longer budget.
#[derive(Debug, Clone)]
pub struct TimeoutBudget {
    pub base: Duration,
    pub per_line: Duration,
}

impl Default for TimeoutBudget {
    fn default() -> Self {
        Self {
            base: Duration::from_secs(5),
            per_line: Duration::from_millis(500),
        }
    }
}

impl TimeoutBudget {
    pub fn for_lines(&self, lines: usize) -> Duration {
        self.base + self.per_line.saturating_mul(lines as u32)
    }
}

/// Run `op` under the retry policy.
///
/// Only transient errors (see [`TransportError::is_transient`]) are retried;
/// deterministic failures return immediately. After each transient failure
/// the wrapper sleeps the backoff delay, and once `max_attempts` physical
/// requests have been made it returns the last transient error. It never
/// panics past this boundary.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, TransportError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, TransportError>>,
{
    let mut last = TransportError::NoResponse;

    for attempt in 0..policy.max_attempts {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() => {
                let delay = policy.delay_for_attempt(attempt);
                warn!(attempt, %err, ?delay, "transient transport failure, backing off");
                last = err;
                tokio::time::sleep(delay).await;
            }
            Err(err) => {
                debug!(attempt, %err, "non-retryable transport failure");
                return Err(err);
            }
        }
    }

    Err(last)
}

/// Wrap a future with a timeout, mapping expiry to `TransportError::Timeout`.
pub async fn with_timeout<T, Fut>(budget: Duration, fut: Fut) -> Result<T, TransportError>
where
    Fut: Future<Output = Result<T, TransportError>>,
{
    match tokio::time::timeout(budget, fut).await {
        Ok(result) => result,
        Err(_) => Err(TransportError::Timeout(budget)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::new(3, Duration::from_millis(100))
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let policy = fast_policy();
        assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(400));
    }

    #[test]
    fn backoff_is_capped() {
        let policy = RetryPolicy {
            max_attempts: 10,
            base_delay: Duration::from_secs(10),
            max_delay: Duration::from_secs(30),
        };
        assert_eq!(policy.delay_for_attempt(5), Duration::from_secs(30));
    }

    #[test]
    fn timeout_budget_scales_with_batch_size() {
        let budget = TimeoutBudget {
            base: Duration::from_secs(5),
            per_line: Duration::from_millis(500),
        };
        assert_eq!(budget.for_lines(1), Duration::from_millis(5500));
        assert_eq!(budget.for_lines(10), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_after_exactly_three_attempts_with_doubling_delays() {
        let policy = fast_policy();
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let started = tokio::time::Instant::now();
        let result: Result<(), _> = with_retry(&policy, move |_| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(TransportError::Timeout(Duration::from_secs(1)))
            }
        })
        .await;

        assert!(matches!(result, Err(TransportError::Timeout(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        // d + 2d + 4d with d = 100ms.
        assert_eq!(started.elapsed(), Duration::from_millis(700));
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_transient_failure() {
        let policy = fast_policy();
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let result = with_retry(&policy, move |_| {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(TransportError::NoResponse)
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(42));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn client_errors_are_not_retried() {
        let policy = fast_policy();
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let result: Result<(), _> = with_retry(&policy, move |_| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(TransportError::status(400, "bad request"))
            }
        })
        .await;

        assert_eq!(result, Err(TransportError::status(400, "bad request")));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_coded_4xx_is_retried() {
        let policy = fast_policy();
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let result: Result<(), _> = with_retry(&policy, move |_| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(TransportError::status(408, "request timeout"))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn with_timeout_maps_expiry_to_timeout_error() {
        let budget = Duration::from_secs(1);
        let result: Result<(), _> = with_timeout(budget, async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        assert_eq!(result, Err(TransportError::Timeout(budget)));
    }
}
