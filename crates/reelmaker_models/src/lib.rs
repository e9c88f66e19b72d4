//! Stage adapters for Reelmaker.
//!
//! - [`ReplicateClient`] implements the generation stages on Replicate
//! - [`HttpDownloader`] fetches segments for merging
//! - [`FfmpegMerger`] concatenates local clips

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod download;
mod merge;
mod replicate;

pub use download::HttpDownloader;
pub use merge::{FfmpegMerger, concat_list};
pub use replicate::{
    Prediction, PredictionRequest, PredictionStatus, PredictionUrls, REPLICATE_TOKEN_VAR,
    ReplicateClient, ReplicateModels, ReplicateSettings, composite_input, decode_artifact,
    decode_remote_artifact, decode_text, frame_input, image_input, sound_input, text_input,
    video_input,
};
