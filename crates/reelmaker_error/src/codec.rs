//! Codec error types.

/// Merging or transcoding clips failed.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Codec Error: {} at line {} in {}", message, line, file)]
pub struct CodecError {
    /// Error message, usually the tail of the encoder output
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl CodecError {
    /// Create a new CodecError with the given message at the current location.
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
