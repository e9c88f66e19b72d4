//! Model error types.

/// A stage was reachable but returned an invalid or empty artifact.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Model Error: {} at line {} in {}", message, line, file)]
pub struct ModelError {
    /// What was wrong with the stage output
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ModelError {
    /// Create a new ModelError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelmaker_error::ModelError;
    ///
    /// let err = ModelError::new("empty artifact locator");
    /// assert!(err.message.contains("empty"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
