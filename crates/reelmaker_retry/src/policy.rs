//! Retry policy settings.

use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// How failed stage calls are retried.
///
/// `initial_backoff_ms` and `max_delay_secs` are lower bounds: errors that
/// ask for longer waits (rate limiting, overloaded upstreams) get them.
///
/// # Examples
///
/// ```
/// use reelmaker_retry::RetryPolicy;
///
/// let policy = RetryPolicy::default().with_max_attempts(5_usize);
/// assert_eq!(*policy.max_attempts(), 5);
/// assert_eq!(*policy.initial_backoff_ms(), 2000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct RetryPolicy {
    /// Whether retries happen at all
    #[serde(default = "default_enabled")]
    enabled: bool,
    /// Total attempts, including the first
    #[serde(default = "default_max_attempts")]
    max_attempts: usize,
    /// Initial backoff between attempts
    #[serde(default = "default_initial_backoff_ms")]
    initial_backoff_ms: u64,
    /// Cap on a single backoff delay
    #[serde(default = "default_max_delay_secs")]
    max_delay_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_max_attempts() -> usize {
    3
}

fn default_initial_backoff_ms() -> u64 {
    2000
}

fn default_max_delay_secs() -> u64 {
    30
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_delay_secs: default_max_delay_secs(),
        }
    }
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Number of retries after the first attempt.
    pub fn retries(&self) -> usize {
        if self.enabled {
            self.max_attempts.saturating_sub(1)
        } else {
            0
        }
    }
}
