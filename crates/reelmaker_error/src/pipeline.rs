//! Run-level pipeline error types.

/// Fatal conditions that abort a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PipelineErrorKind {
    /// The character prompt or image could not be produced
    #[display("Character bootstrap failed: {}", _0)]
    CharacterBootstrap(String),
    /// The scene 1 setting or combined reference image could not be produced
    #[display("Scene 1 setup failed: {}", _0)]
    SceneSetup(String),
    /// Too few segments survived to merge
    #[display("Assembly failed: merging requires at least 2 segments, got {}", produced)]
    InsufficientSegments {
        /// Number of segments produced by the scene loop
        produced: usize,
    },
}

/// Run-level pipeline failure.
///
/// # Examples
///
/// ```
/// use reelmaker_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::InsufficientSegments { produced: 1 });
/// assert!(format!("{}", err).contains("at least 2 segments"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
