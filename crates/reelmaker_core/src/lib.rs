//! Core data types for the Reelmaker pipeline.
//!
//! This crate provides the value types threaded between pipeline stages:
//! the story idea, the interpreted storyboard plan, opaque artifact
//! references, and the request shapes sent to generation stages.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod idea;
mod request;
mod sampling;
mod storyboard;

pub use artifact::ArtifactReference;
pub use idea::StoryIdea;
pub use request::{
    AspectRatio, ImageRequest, ImageRequestBuilder, TextRequest, TextRequestBuilder,
};
pub use sampling::SamplingParams;
pub use storyboard::{Character, SCENE_COUNT, SceneDescriptor, StoryboardPlan};
