//! Retrying arbitrary async operations.

use crate::RetryPolicy;
use reelmaker_error::{ReelError, ReelResult, RetryableError};
use std::future::Future;
use std::time::Duration;
use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff, strategy::jitter};
use tracing::{info, warn};

/// Run `operation`, retrying retryable failures per `policy`.
///
/// The first failure picks the backoff strategy: the policy's settings,
/// raised to whatever the error itself asks for. Non-retryable failures are
/// returned at once.
///
/// # Examples
///
/// ```
/// use reelmaker_error::ReelResult;
/// use reelmaker_retry::{RetryPolicy, retry_operation};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let result: ReelResult<u32> =
///     retry_operation(&RetryPolicy::default(), "answer", || async { Ok(42) }).await;
/// assert_eq!(result.unwrap(), 42);
/// # }
/// ```
pub async fn retry_operation<T, F, Fut>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> ReelResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ReelResult<T>>,
{
    let first_error = match operation().await {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let retries = policy.retries();
    if retries == 0 || !first_error.is_retryable() {
        warn!(operation = operation_name, error = %first_error, "Operation failed, not retrying");
        return Err(first_error);
    }

    let (hinted_ms, _, hinted_delay_secs) = first_error.retry_strategy_params();
    let initial_ms = hinted_ms.max(*policy.initial_backoff_ms());
    let max_delay_secs = hinted_delay_secs.max(*policy.max_delay_secs());

    info!(
        operation = operation_name,
        error = %first_error,
        initial_backoff_ms = initial_ms,
        retries,
        max_delay_secs,
        "Operation failed, will retry with configured strategy"
    );

    let strategy = ExponentialBackoff::from_millis(initial_ms)
        .factor(2)
        .max_delay(Duration::from_secs(max_delay_secs))
        .map(jitter)
        .take(retries);

    Retry::spawn(strategy, || {
        let attempt = operation();
        async move {
            attempt.await.map_err(|e: ReelError| {
                if e.is_retryable() {
                    warn!(operation = operation_name, error = %e, "Attempt failed, will retry");
                    RetryError::Transient {
                        err: e,
                        retry_after: None,
                    }
                } else {
                    warn!(operation = operation_name, error = %e, "Permanent error, failing immediately");
                    RetryError::Permanent(e)
                }
            })
        }
    })
    .await
}
