//! Transport error types.

/// Specific conditions under which a remote stage could not be reached.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum TransportErrorKind {
    /// The request could not be sent or the connection dropped
    #[display("Request failed: {}", _0)]
    Request(String),
    /// The remote answered with a non-success HTTP status
    #[display("HTTP {} error: {}", status_code, message)]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason phrase
        message: String,
    },
    /// Credentials were missing or rejected
    #[display("Authentication failed: {}", _0)]
    Auth(String),
    /// The call did not complete in time
    #[display("Timed out after {} seconds", _0)]
    Timeout(u64),
}

impl TransportErrorKind {
    /// Check if this transport failure is worth repeating.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportErrorKind::Request(_) | TransportErrorKind::Timeout(_) => true,
            TransportErrorKind::Status { status_code, .. } => {
                matches!(*status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            TransportErrorKind::Auth(_) => false,
        }
    }
}

/// Network or authentication failure talking to an external stage.
///
/// # Examples
///
/// ```
/// use reelmaker_error::{TransportError, TransportErrorKind};
///
/// let err = TransportError::new(TransportErrorKind::Status {
///     status_code: 503,
///     message: "overloaded".to_string(),
/// });
/// assert!(format!("{}", err).contains("HTTP 503"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transport Error: {} at line {} in {}", kind, line, file)]
pub struct TransportError {
    /// The specific error condition
    pub kind: TransportErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl TransportError {
    /// Create a new TransportError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TransportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
