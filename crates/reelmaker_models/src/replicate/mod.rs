//! Replicate-hosted stage adapters.

mod client;
mod dto;
mod settings;
mod stages;

pub use client::{REPLICATE_TOKEN_VAR, ReplicateClient};
pub use dto::{
    Prediction, PredictionRequest, PredictionStatus, PredictionUrls, decode_artifact,
    decode_remote_artifact, decode_text,
};
pub use settings::{ReplicateModels, ReplicateSettings};
pub use stages::{composite_input, frame_input, image_input, sound_input, text_input, video_input};
