//! Trait definitions for the external stages the Reelmaker pipeline drives.
//!
//! Each trait is a narrow contract over one remote or local capability.
//! Implementations return either an artifact reference or a failure; the
//! pipeline decides what a failure means for the run.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{
    ClipDownloader, ClipMerger, FrameExtractor, ImageGenerator, SoundOverlay, TextGenerator,
    VideoGenerator,
};
