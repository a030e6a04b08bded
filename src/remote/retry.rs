//! Retry Policy
//!
//! Explicit, injectable retry for transient transport failures. The default
//! policy is disabled (a single attempt), so callers opt in deliberately.
//! Only transport-level failures (`Unreachable`, `TimedOut`) are retried;
//! an HTTP rejection is a definitive answer from the server and is never
//! re-sent.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::AuthError;

/// Bounded retry with exponential backoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_base: Duration,
    backoff_max: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::disabled()
    }
}

impl RetryPolicy {
    /// A single attempt, no retries.
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            backoff_base: Duration::ZERO,
            backoff_max: Duration::ZERO,
        }
    }

    /// At most `max_attempts` total attempts, waiting `backoff_base * 2^(n-1)`
    /// (capped at `backoff_max`) before the n-th retry.
    pub fn new(max_attempts: u32, backoff_base: Duration, backoff_max: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_base,
            backoff_max,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.max_attempts > 1
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    fn backoff_for(&self, attempt: u32) -> Duration {
        let base_ms = self.backoff_base.as_millis() as u64;
        let backoff_ms = base_ms.saturating_mul(2_u64.saturating_pow(attempt.saturating_sub(1)));
        Duration::from_millis(backoff_ms).min(self.backoff_max)
    }

    /// Whether a failed attempt should be retried. `attempt` is 1-based.
    fn should_retry(&self, attempt: u32, error: &AuthError) -> bool {
        attempt < self.max_attempts
            && matches!(error, AuthError::Unreachable | AuthError::TimedOut)
    }
}

/// Run `operation` under `policy`, re-invoking it on retryable failures.
pub(crate) async fn run_with_retry<F, Fut, T>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, AuthError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AuthError>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, "request succeeded after retry");
                }
                return Ok(value);
            }
            Err(error) if policy.should_retry(attempt, &error) => {
                let backoff = policy.backoff_for(attempt);
                warn!(attempt, error = %error, ?backoff, "transient failure, retrying");
                sleep(backoff).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1), Duration::from_millis(10));
        let counter = Arc::new(AtomicU32::new(0));
        let calls = counter.clone();

        let result = run_with_retry(&policy, || {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, AuthError>(42)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transient_failure_retried_until_success() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1), Duration::from_millis(10));
        let counter = Arc::new(AtomicU32::new(0));
        let calls = counter.clone();

        let result = run_with_retry(&policy, || {
            let calls = calls.clone();
            async move {
                let attempt = calls.fetch_add(1, Ordering::SeqCst);
                if attempt < 2 {
                    Err(AuthError::Unreachable)
                } else {
                    Ok::<u32, AuthError>(7)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_attempts_are_bounded() {
        let policy = RetryPolicy::new(2, Duration::from_millis(1), Duration::from_millis(10));
        let counter = Arc::new(AtomicU32::new(0));
        let calls = counter.clone();

        let result: Result<u32, AuthError> = run_with_retry(&policy, || {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(AuthError::TimedOut)
            }
        })
        .await;

        assert_eq!(result.unwrap_err(), AuthError::TimedOut);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_server_rejection_is_never_retried() {
        let policy = RetryPolicy::new(5, Duration::from_millis(1), Duration::from_millis(10));
        let counter = Arc::new(AtomicU32::new(0));
        let calls = counter.clone();

        let result: Result<u32, AuthError> = run_with_retry(&policy, || {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(AuthError::ServerRejected("Unauthorized".to_string()))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_disabled_policy_makes_single_attempt() {
        let policy = RetryPolicy::disabled();
        assert!(!policy.is_enabled());

        let counter = Arc::new(AtomicU32::new(0));
        let calls = counter.clone();

        let result: Result<u32, AuthError> = run_with_retry(&policy, || {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(AuthError::Unreachable)
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_backoff_is_capped() {
        let policy = RetryPolicy::new(10, Duration::from_millis(100), Duration::from_millis(400));
        assert_eq!(policy.backoff_for(1), Duration::from_millis(100));
        assert_eq!(policy.backoff_for(2), Duration::from_millis(200));
        assert_eq!(policy.backoff_for(3), Duration::from_millis(400));
        assert_eq!(policy.backoff_for(8), Duration::from_millis(400));
    }
}
