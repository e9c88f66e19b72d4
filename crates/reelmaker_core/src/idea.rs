//! The free-text story idea.

use serde::{Deserialize, Serialize};

/// A one-line story idea supplied by the user.
///
/// The idea is passed verbatim into the storyboard template. No length bound
/// is enforced here.
///
/// # Examples
///
/// ```
/// use reelmaker_core::StoryIdea;
///
/// let idea = StoryIdea::new("A lighthouse keeper befriends a gull");
/// assert_eq!(idea.as_str(), "A lighthouse keeper befriends a gull");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct StoryIdea(String);

impl StoryIdea {
    /// Wrap an idea string.
    pub fn new(idea: impl Into<String>) -> Self {
        Self(idea.into())
    }

    /// Borrow the idea text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StoryIdea {
    fn from(idea: &str) -> Self {
        Self::new(idea)
    }
}
