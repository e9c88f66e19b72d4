//! Reelmaker - one-line story ideas to twelve-scene video reels
//!
//! Reelmaker asks a text model for a storyboard, then drives image, video,
//! frame-extraction and sound models scene by scene, threading a reference
//! frame from each scene into the next, and concatenates the clips.
//!
//! # Architecture
//!
//! - `reelmaker_error` - Error types
//! - `reelmaker_core` - Plans, artifacts, requests
//! - `reelmaker_interface` - Stage traits
//! - `reelmaker_storyboard` - Storyboard interpretation and JSON recovery
//! - `reelmaker_pipeline` - Scene orchestration and merge assembly
//! - `reelmaker_retry` - Caller-side retry policy
//! - `reelmaker_models` - Replicate, HTTP download and ffmpeg adapters
//!
//! This crate re-exports everything and adds configuration, logging
//! initialisation and the `reelmaker` binary.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use reelmaker::{ReelConfig, StoryIdea, Studio};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let studio = Studio::replicate(ReelConfig::load()?)?;
//!     let plan = studio
//!         .storyboard(&StoryIdea::new("A lighthouse keeper befriends a gull"))
//!         .await?
//!         .into_plan();
//!     let run = studio.produce(&plan, "first-reel").await?;
//!     println!("{:?}", run.final_artifact());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod observability;
mod studio;

pub use config::{DEFAULT_CONFIG, MergeConfig, OutputConfig, ReelConfig, SamplingConfig};
pub use observability::{
    DEFAULT_LOG_FILTER, ObservabilityConfig, init_observability, init_observability_with_config,
};
pub use studio::{Studio, interpret_with_retry, load_plan, retrying_stages};

pub use reelmaker_core::*;
pub use reelmaker_error::*;
pub use reelmaker_interface::*;
pub use reelmaker_models::*;
pub use reelmaker_pipeline::*;
pub use reelmaker_retry::*;
pub use reelmaker_storyboard::*;
