//! Errors from assembling requests and stage sets.

/// What went wrong while building a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// A required field was never set
    #[display("{} is incomplete: {}", target, reason)]
    Incomplete {
        /// What was being built, e.g. "text request"
        target: &'static str,
        /// The builder's own explanation
        reason: String,
    },
}

/// Builder error with location tracking.
///
/// # Examples
///
/// ```
/// use reelmaker_error::{BuilderError, BuilderErrorKind};
///
/// let err = BuilderError::incomplete("stage set", "`video` must be initialized");
/// assert!(matches!(err.kind(), BuilderErrorKind::Incomplete { target: "stage set", .. }));
/// assert!(err.to_string().contains("stage set is incomplete"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    kind: BuilderErrorKind,
    line: u32,
    file: &'static str,
}

impl BuilderError {
    /// Create a new builder error with caller location tracking.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// A `target` builder was finished with a field unset.
    #[track_caller]
    pub fn incomplete(target: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::new(BuilderErrorKind::Incomplete {
            target,
            reason: reason.to_string(),
        })
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BuilderErrorKind {
        &self.kind
    }
}
