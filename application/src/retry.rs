use std::future::Future;
use std::time::Duration;

use recap_domain::DomainError;

/// Bounded retry with linear backoff (`base_delay * attempt_number`).
/// Only errors classified as transient are retried; validation and other
/// deterministic failures return immediately. Exhausting the attempts
/// returns the last observed error unchanged in kind.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub async fn run<T, F, Fut>(&self, operation: &str, mut attempt_fn: F) -> Result<T, DomainError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DomainError>>,
    {
        let mut last_error = None;
        for attempt in 1..=self.max_attempts {
            match attempt_fn().await {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_transient() => return Err(err),
                Err(err) => {
                    tracing::warn!(
                        operation,
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "attempt failed"
                    );
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.base_delay * attempt).await;
                    }
                    last_error = Some(err);
                }
            }
        }

        tracing::error!(operation, attempts = self.max_attempts, "all attempts failed");
        Err(last_error
            .unwrap_or_else(|| DomainError::internal("retry policy produced no result")))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn policy(attempts: u32) -> RetryPolicy {
        RetryPolicy::new(attempts, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn transient_failures_are_retried_until_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let result = policy(3)
            .run("op", move || {
                let counter = Arc::clone(&counter);
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(DomainError::download("flaky network"))
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn validation_errors_are_never_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let result: Result<(), _> = policy(5)
            .run("op", move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(DomainError::validation("bad input"))
                }
            })
            .await;
        assert_eq!(result.unwrap_err().error_type(), "ValidationError");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhaustion_preserves_the_last_error_kind() {
        let result: Result<(), _> = policy(2)
            .run("op", || async { Err(DomainError::translation("provider down")) })
            .await;
        let err = result.unwrap_err();
        assert_eq!(err.error_type(), "TranslationError");
        assert_eq!(err, DomainError::translation("provider down"));
    }
}
