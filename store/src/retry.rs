use crate::errors::{BackendError, StorageError, StorageOperation};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Capped exponential backoff for storage operations.
///
/// An operation is attempted at most `max_attempts` times. Before retry `n`
/// (1-based) the policy waits `min(base_delay * 2^(n-1), max_delay)`, so the
/// default policy waits 100ms, then 200ms, and gives up after the third
/// attempt. Failures whose [`BackendError::is_retryable`] is false end the
/// loop immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(100);
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(2000);

    /// Build a policy. `max_attempts` is clamped to at least one and
    /// `max_delay` to at least `base_delay`.
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay: max_delay.max(base_delay),
        }
    }

    /// A single attempt with no waiting.
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// Delay to wait before the given retry (1 = first retry).
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1);
        let factor = 2u32.checked_pow(exponent).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Run `op` under this policy, mapping the last failure into a
    /// [`StorageError`] tagged with `operation`.
    pub async fn run<T, F, Fut>(
        &self,
        operation: StorageOperation,
        mut op: F,
    ) -> Result<T, StorageError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, BackendError>>,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_retryable() => {
                    log::debug!("Non-retryable {operation} failure, failing immediately: {err}");
                    return Err(StorageError::new(operation, err, attempt));
                }
                Err(err) if attempt >= self.max_attempts => {
                    log::warn!("Storage {operation} failed after {attempt} attempts: {err}");
                    return Err(StorageError::new(operation, err, attempt));
                }
                Err(err) => {
                    let delay = self.delay_for_retry(attempt);
                    log::debug!(
                        "Storage {operation} attempt {attempt} failed, retrying in {delay:?}: {err}"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MAX_ATTEMPTS,
            Self::DEFAULT_BASE_DELAY,
            Self::DEFAULT_MAX_DELAY,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    #[test]
    fn test_default_delays() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.delay_for_retry(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for_retry(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for_retry(3), Duration::from_millis(400));
        assert_eq!(policy.delay_for_retry(5), Duration::from_millis(1600));
        assert_eq!(policy.delay_for_retry(6), Duration::from_millis(2000));
        assert_eq!(policy.delay_for_retry(60), Duration::from_millis(2000));
    }

    #[test]
    fn test_constructor_clamps() {
        let policy = RetryPolicy::new(0, Duration::from_millis(500), Duration::from_millis(10));
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.max_delay(), Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failures_are_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let started = Instant::now();

        let result = RetryPolicy::default()
            .run(StorageOperation::Save, || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(BackendError::Unavailable("busy".to_string()))
                    } else {
                        Ok("stored")
                    }
                }
            })
            .await;

        assert_ok_eq!(result, "stored");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        let waited = started.elapsed();
        assert!(waited >= Duration::from_millis(300));
        assert!(waited < Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_return_storage_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let err = RetryPolicy::default()
            .run(StorageOperation::Load, || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>(BackendError::Io("disk offline".to_string()))
                }
            })
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(err.operation, StorageOperation::Load);
        assert!(err.retryable);
        assert_eq!(err.source, BackendError::Io("disk offline".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_quota_exceeded_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let err = RetryPolicy::default()
            .run(StorageOperation::Save, || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>(BackendError::QuotaExceeded { needed: 9, limit: 4 })
                }
            })
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!err.retryable);
        assert!(err.is_quota_exceeded());
    }

    proptest! {
        #[test]
        fn prop_delay_is_capped_and_monotonic(
            base_ms in 1u64..500,
            max_ms in 1u64..5000,
            retry in 1u32..64,
        ) {
            let policy = RetryPolicy::new(
                3,
                Duration::from_millis(base_ms),
                Duration::from_millis(max_ms),
            );

            let current = policy.delay_for_retry(retry);
            let next = policy.delay_for_retry(retry + 1);

            prop_assert!(current <= policy.max_delay());
            prop_assert!(current >= policy.base_delay().min(policy.max_delay()));
            prop_assert!(next >= current);
        }
    }
}
