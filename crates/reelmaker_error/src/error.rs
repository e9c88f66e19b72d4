//! Top-level error wrapper types.

use crate::{
    BuilderError, CodecError, ConfigError, JsonError, ModelError, PipelineError, RetryableError,
    StorageError, StoryboardError, TransportError, TransportErrorKind, ValidationError,
};

/// Every error family produced by Reelmaker crates.
///
/// # Examples
///
/// ```
/// use reelmaker_error::{ReelError, ModelError};
///
/// let err: ReelError = ModelError::new("no output").into();
/// assert!(format!("{}", err).contains("Model Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ReelErrorKind {
    /// Network or authentication failure
    #[from(TransportError)]
    Transport(TransportError),
    /// Stage returned an invalid or empty artifact
    #[from(ModelError)]
    Model(ModelError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Semantically invalid input
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Local file failure
    #[from(StorageError)]
    Storage(StorageError),
    /// Clip merge failure
    #[from(CodecError)]
    Codec(CodecError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Storyboard interpretation failure
    #[from(StoryboardError)]
    Storyboard(StoryboardError),
    /// Fatal pipeline failure
    #[from(PipelineError)]
    Pipeline(PipelineError),
}

/// Reelmaker error with kind discrimination.
///
/// # Examples
///
/// ```
/// use reelmaker_error::{ReelResult, ConfigError};
///
/// fn might_fail() -> ReelResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Reelmaker Error: {}", _0)]
pub struct ReelError(Box<ReelErrorKind>);

impl ReelError {
    /// Create a new error from a kind.
    pub fn new(kind: ReelErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ReelErrorKind {
        &self.0
    }

    /// Upstream payload attached to the failure, when the stage returned one.
    pub fn raw_output(&self) -> Option<&str> {
        match self.kind() {
            ReelErrorKind::Storyboard(e) => e.kind.raw_output(),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to ReelErrorKind
impl<T> From<T> for ReelError
where
    T: Into<ReelErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

impl RetryableError for ReelError {
    fn is_retryable(&self) -> bool {
        match self.kind() {
            ReelErrorKind::Transport(e) => e.kind.is_retryable(),
            ReelErrorKind::Model(_) => true,
            // The storyboard generator is non-deterministic, so a repeat can succeed
            ReelErrorKind::Storyboard(_) => true,
            _ => false,
        }
    }

    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        match self.kind() {
            ReelErrorKind::Transport(e) => match &e.kind {
                TransportErrorKind::Status { status_code: 429, .. } => (5000, 3, 40),
                TransportErrorKind::Status { status_code: 503, .. } => (2000, 3, 60),
                TransportErrorKind::Timeout(_) => (2000, 2, 30),
                _ => (2000, 3, 30),
            },
            _ => (2000, 3, 30),
        }
    }
}

/// Result type for Reelmaker operations.
pub type ReelResult<T> = std::result::Result<T, ReelError>;
