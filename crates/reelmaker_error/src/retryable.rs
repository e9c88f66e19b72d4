//! Retry classification shared by stage errors.

/// Trait for errors that support retry logic.
///
/// The pipeline core never retries by itself. Callers that wrap stage
/// adapters consult this trait to decide whether repeating a call is useful.
///
/// # Examples
///
/// ```
/// use reelmaker_error::{ReelError, RetryableError, TransportError, TransportErrorKind};
///
/// let err: ReelError = TransportError::new(TransportErrorKind::Status {
///     status_code: 503,
///     message: "Service unavailable".to_string(),
/// })
/// .into();
///
/// assert!(err.is_retryable());
/// let (backoff, retries, _max_delay) = err.retry_strategy_params();
/// assert_eq!(backoff, 2000);
/// assert_eq!(retries, 3);
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Transient errors like 503, 429 or dropped connections return true.
    /// Permanent errors like 401 or a malformed configuration return false.
    fn is_retryable(&self) -> bool;

    /// Get retry strategy parameters for this error.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        (2000, 3, 30)
    }
}
