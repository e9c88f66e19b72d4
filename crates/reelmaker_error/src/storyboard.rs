//! Storyboard interpretation error types.

/// Specific conditions under which a storyboard could not be produced.
///
/// Every variant except [`StoryboardErrorKind::GenerationFailed`] carries the
/// cleaned upstream text so callers can log what the generator returned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StoryboardErrorKind {
    /// The text-generation call itself failed
    #[display("Generation call failed: {}", _0)]
    GenerationFailed(String),
    /// Odd number of quote characters, the response stopped mid-string
    #[display("Response appears to be truncated ({} quote characters)", quotes)]
    Truncated {
        /// Number of quote characters counted
        quotes: usize,
        /// Cleaned upstream text
        raw: String,
    },
    /// The response was not valid JSON, even after repair
    #[display("Parse failed: {}", message)]
    ParseFailed {
        /// Parser message from the first attempt
        message: String,
        /// Cleaned upstream text
        raw: String,
    },
    /// A required top-level key is absent
    #[display("Validation error: missing required key '{}'", key)]
    MissingKey {
        /// Name of the missing key
        key: String,
        /// Cleaned upstream text
        raw: String,
    },
    /// The character list is empty or malformed
    #[display("Validation error: {}", message)]
    InvalidShape {
        /// What was wrong
        message: String,
        /// Cleaned upstream text
        raw: String,
    },
    /// The scene list does not have the required length
    #[display("Validation error: expected {} scenes, got {}", expected, actual)]
    SceneCount {
        /// Required number of scenes
        expected: usize,
        /// Number of scenes in the document
        actual: usize,
        /// Cleaned upstream text
        raw: String,
    },
}

impl StoryboardErrorKind {
    /// Upstream text attached for diagnostics, if any.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            StoryboardErrorKind::GenerationFailed(_) => None,
            StoryboardErrorKind::Truncated { raw, .. }
            | StoryboardErrorKind::ParseFailed { raw, .. }
            | StoryboardErrorKind::MissingKey { raw, .. }
            | StoryboardErrorKind::InvalidShape { raw, .. }
            | StoryboardErrorKind::SceneCount { raw, .. } => Some(raw),
        }
    }
}

/// Error type for storyboard interpretation.
///
/// # Examples
///
/// ```
/// use reelmaker_error::{StoryboardError, StoryboardErrorKind};
///
/// let err = StoryboardError::new(StoryboardErrorKind::SceneCount {
///     expected: 12,
///     actual: 11,
///     raw: "{}".to_string(),
/// });
/// assert!(format!("{}", err).contains("expected 12 scenes, got 11"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storyboard Error: {} at line {} in {}", kind, line, file)]
pub struct StoryboardError {
    /// The specific error condition
    pub kind: StoryboardErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoryboardError {
    /// Create a new StoryboardError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryboardErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
