//! Opaque references to generated artifacts.

use reelmaker_error::{ReelError, ReelResult, ValidationError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Locator for a generated image, video or audio artifact.
///
/// The pipeline never inspects artifact content. It only forwards references
/// between stages and checks that the locator itself is well formed:
/// non-empty and free of control characters. Remote locators may not contain
/// whitespace; `file://` locators may, since local paths often do.
///
/// # Examples
///
/// ```
/// use reelmaker_core::ArtifactReference;
///
/// let video = ArtifactReference::parse("https://cdn.example.com/scene-1.mp4").unwrap();
/// assert!(video.is_remote());
///
/// assert!(ArtifactReference::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactReference(String);

impl ArtifactReference {
    /// Validate and wrap a locator string.
    ///
    /// Surrounding whitespace is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the locator is empty, contains control
    /// characters, or is not a `file://` locator and contains whitespace.
    #[track_caller]
    pub fn parse(locator: impl Into<String>) -> ReelResult<Self> {
        let locator = locator.into();
        let trimmed = locator.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new("artifact locator is empty").into());
        }
        if trimmed.chars().any(char::is_control) {
            return Err(ValidationError::new(format!(
                "artifact locator contains control characters: {:?}",
                trimmed
            ))
            .into());
        }
        let local = trimmed.starts_with("file://");
        if !local && trimmed.chars().any(char::is_whitespace) {
            return Err(ValidationError::new(format!(
                "artifact locator contains whitespace: {:?}",
                trimmed
            ))
            .into());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Reference a local file as a `file://` locator.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the path renders to an invalid locator.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        Self::parse(format!("file://{}", path.display()))
    }

    /// Borrow the locator string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the locator points at an `http(s)` resource.
    pub fn is_remote(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }

    /// Local path for `file://` locators and bare paths.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if let Some(path) = self.0.strip_prefix("file://") {
            return Some(PathBuf::from(path));
        }
        if self.0.contains("://") {
            None
        } else {
            Some(PathBuf::from(&self.0))
        }
    }
}

impl TryFrom<String> for ArtifactReference {
    type Error = ReelError;

    fn try_from(locator: String) -> ReelResult<Self> {
        Self::parse(locator)
    }
}

impl From<ArtifactReference> for String {
    fn from(reference: ArtifactReference) -> Self {
        reference.0
    }
}

impl AsRef<str> for ArtifactReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
