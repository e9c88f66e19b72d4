//! Request shapes for generation stages.

use crate::{ArtifactReference, SamplingParams};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A text-generation request: one prompt plus sampling controls.
///
/// # Examples
///
/// ```
/// use reelmaker_core::{SamplingParams, TextRequest};
///
/// let request = TextRequest::builder()
///     .prompt("Describe a harbour at dawn")
///     .sampling(SamplingParams::default())
///     .build()
///     .unwrap();
/// assert!(request.prompt().contains("harbour"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct TextRequest {
    /// The full prompt text
    prompt: String,
    /// Sampling controls
    #[builder(default)]
    sampling: SamplingParams,
}

impl TextRequest {
    /// Start building a text request.
    pub fn builder() -> TextRequestBuilder {
        TextRequestBuilder::default()
    }
}

/// Output framing for generated images.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum AspectRatio {
    /// 1:1, used for the character sheet
    #[strum(serialize = "1:1")]
    #[serde(rename = "1:1")]
    Square,
    /// 16:9, used for settings, scenes and video
    #[default]
    #[strum(serialize = "16:9")]
    #[serde(rename = "16:9")]
    Widescreen,
    /// 9:16
    #[strum(serialize = "9:16")]
    #[serde(rename = "9:16")]
    Portrait,
}

/// An image-generation request.
///
/// With no references the stage generates from the prompt alone. With
/// references it composes them, in order, under the prompt's direction.
///
/// # Examples
///
/// ```
/// use reelmaker_core::{ArtifactReference, AspectRatio, ImageRequest};
///
/// let character = ArtifactReference::parse("https://a.example/char.png").unwrap();
/// let setting = ArtifactReference::parse("https://a.example/set.png").unwrap();
///
/// let request = ImageRequest::builder()
///     .prompt("The person stands by the window")
///     .references(vec![character, setting])
///     .aspect_ratio(AspectRatio::Widescreen)
///     .build()
///     .unwrap();
/// assert_eq!(request.references().len(), 2);
/// assert_eq!(request.aspect_ratio().to_string(), "16:9");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ImageRequest {
    /// The image prompt
    prompt: String,
    /// Reference images to compose, in order
    #[builder(default)]
    references: Vec<ArtifactReference>,
    /// Output framing
    #[builder(default)]
    aspect_ratio: AspectRatio,
}

impl ImageRequest {
    /// Start building an image request.
    pub fn builder() -> ImageRequestBuilder {
        ImageRequestBuilder::default()
    }
}
