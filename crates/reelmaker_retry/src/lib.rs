//! Caller-side retries for Reelmaker stages.
//!
//! Stage failures classified as retryable by
//! [`RetryableError`](reelmaker_error::RetryableError) are retried with
//! exponential backoff and jitter. Everything else fails on the first
//! attempt.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod decorator;
mod operation;
mod policy;

pub use decorator::Retrying;
pub use operation::retry_operation;
pub use policy::RetryPolicy;
