//! Retry policy for provider calls.
//!
//! Wraps a single provider call with bounded retries. Only transient
//! failures (rate limiting, timeouts, unavailability) are retried; the
//! delay before attempt *n* (n ≥ 2) is `base_delay * 2^(n-2)` plus a random
//! jitter in `[0, base_delay)`, capped at `max_delay`.
//!
//! The policy holds configuration only, so one instance can be cloned into
//! any number of concurrent calls.

use rand::Rng;
use relay_domain::ProviderOutcome;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Retry configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Base delay for exponential backoff (also the jitter range)
    pub base_delay: Duration,
    /// Upper bound of any single delay
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryConfig {
    pub fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max;
        self
    }

    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }
}

/// Bounded exponential-backoff retry around one provider call
#[derive(Debug, Clone, Default)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Attempts actually made at most (never fewer than one)
    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts.max(1)
    }

    /// Delay to wait before `attempt` (1-indexed) given a jitter value.
    ///
    /// Attempt 1 never waits.
    pub fn backoff(&self, attempt: u32, jitter: Duration) -> Duration {
        if attempt < 2 {
            return Duration::ZERO;
        }
        let factor = 1u32.checked_shl(attempt - 2).unwrap_or(u32::MAX);
        self.config
            .base_delay
            .saturating_mul(factor)
            .saturating_add(jitter)
            .min(self.config.max_delay)
    }

    /// Delay before `attempt` with a fresh random jitter in `[0, base_delay)`.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        self.backoff(attempt, self.random_jitter())
    }

    fn random_jitter(&self) -> Duration {
        let range = u64::try_from(self.config.base_delay.as_nanos()).unwrap_or(u64::MAX);
        if range == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos(rand::rng().random_range(0..range))
    }

    /// Run `operation` until it succeeds, fails permanently, or attempts run out.
    ///
    /// When attempts are exhausted the last failure is returned unchanged.
    pub async fn execute<F, Fut>(&self, label: &str, mut operation: F) -> ProviderOutcome
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ProviderOutcome>,
    {
        let max_attempts = self.max_attempts();
        let mut attempt = 1;

        loop {
            let outcome = operation().await;

            let failure = match &outcome {
                ProviderOutcome::Success { .. } => {
                    if attempt > 1 {
                        info!(provider = label, attempt, "Succeeded after retry");
                    }
                    return outcome;
                }
                ProviderOutcome::Failure(failure) => failure,
            };

            if !failure.retriable {
                debug!(
                    provider = label,
                    attempt,
                    kind = %failure.kind,
                    "Permanent failure, not retrying"
                );
                return outcome;
            }

            if attempt >= max_attempts {
                warn!(
                    provider = label,
                    attempts = attempt,
                    kind = %failure.kind,
                    "Giving up after exhausting retries: {}",
                    failure.message
                );
                return outcome;
            }

            let delay = self.delay_before(attempt + 1);
            warn!(
                provider = label,
                attempt,
                kind = %failure.kind,
                delay_ms = delay.as_millis() as u64,
                "Attempt failed, retrying: {}",
                failure.message
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_domain::{FailureKind, ProviderFailure};
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    fn policy(max_attempts: u32, base_ms: u64, max_ms: u64) -> RetryPolicy {
        RetryPolicy::new(
            RetryConfig::default()
                .with_max_attempts(max_attempts)
                .with_base_delay(Duration::from_millis(base_ms))
                .with_max_delay(Duration::from_millis(max_ms)),
        )
    }

    /// Fails with `kind` for the first `failures` calls, then succeeds.
    async fn flaky(calls: &AtomicU32, failures: u32, kind: FailureKind) -> ProviderOutcome {
        let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
        if n <= failures {
            ProviderOutcome::failure(kind, format!("failure #{n}"))
        } else {
            ProviderOutcome::success("ok")
        }
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = policy(5, 100, 10_000);
        assert_eq!(policy.backoff(1, Duration::ZERO), Duration::ZERO);
        assert_eq!(policy.backoff(2, Duration::ZERO), Duration::from_millis(100));
        assert_eq!(policy.backoff(3, Duration::ZERO), Duration::from_millis(200));
        assert_eq!(policy.backoff(4, Duration::ZERO), Duration::from_millis(400));
    }

    #[test]
    fn test_backoff_adds_jitter_then_caps() {
        let policy = policy(10, 100, 500);
        assert_eq!(
            policy.backoff(2, Duration::from_millis(40)),
            Duration::from_millis(140)
        );
        assert_eq!(
            policy.backoff(4, Duration::from_millis(99)),
            Duration::from_millis(499)
        );
        assert_eq!(policy.backoff(5, Duration::ZERO), Duration::from_millis(500));
        assert_eq!(policy.backoff(60, Duration::ZERO), Duration::from_millis(500));
    }

    #[test]
    fn test_delay_before_stays_in_bounds() {
        let policy = policy(5, 100, 10_000);
        for _ in 0..100 {
            let delay = policy.delay_before(3);
            assert!(delay >= Duration::from_millis(200));
            assert!(delay < Duration::from_millis(300));
        }
    }

    #[test]
    fn test_zero_base_delay_has_no_jitter() {
        let policy = policy(3, 0, 1000);
        assert_eq!(policy.delay_before(2), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_transient_until_success() {
        let policy = policy(3, 100, 10_000);
        let calls = AtomicU32::new(0);
        let started = Instant::now();

        let outcome = policy
            .execute("test", || flaky(&calls, 2, FailureKind::RateLimited))
            .await;

        assert_eq!(outcome, ProviderOutcome::success("ok"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        // 100ms + 200ms of backoff, each with < 100ms jitter
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(300), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_millis(500), "elapsed {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_failure_single_attempt() {
        let policy = policy(3, 100, 10_000);
        for kind in [FailureKind::AuthError, FailureKind::Malformed] {
            let calls = AtomicU32::new(0);
            let outcome = policy.execute("test", || flaky(&calls, 10, kind)).await;
            assert_eq!(calls.load(Ordering::SeqCst), 1);
            assert_eq!(outcome.as_failure().map(|f| f.kind), Some(kind));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_returns_last_failure() {
        let policy = policy(3, 10, 100);
        let calls = AtomicU32::new(0);

        let outcome = policy
            .execute("test", || flaky(&calls, 10, FailureKind::Unavailable))
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            outcome,
            ProviderOutcome::Failure(ProviderFailure::unavailable("failure #3"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_still_calls_once() {
        let policy = policy(0, 10, 100);
        let calls = AtomicU32::new(0);
        let outcome = policy
            .execute("test", || flaky(&calls, 10, FailureKind::Timeout))
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(outcome.is_retriable());
    }

    #[tokio::test]
    async fn test_success_first_try_does_not_wait() {
        let policy = policy(3, 60_000, 60_000);
        let calls = AtomicU32::new(0);
        let outcome = policy
            .execute("test", || flaky(&calls, 0, FailureKind::Timeout))
            .await;
        assert!(outcome.is_success());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
