//! Replicate connection and model settings.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Model identifiers for each stage.
///
/// Identifiers take the form `owner/name`, or `owner/name:version` to pin a
/// specific version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ReplicateModels {
    /// Text generation
    text: String,
    /// Single-prompt image generation
    image: String,
    /// Two-image composition
    composite: String,
    /// Image-to-video
    video: String,
    /// Frame extraction
    frame: String,
    /// Video-to-audio
    sound: String,
}

impl Default for ReplicateModels {
    fn default() -> Self {
        Self {
            text: "google/gemini-2.5-flash".to_string(),
            image: "minimax/image-01".to_string(),
            composite: "flux-kontext-apps/multi-image-kontext-pro".to_string(),
            video: "bytedance/seedance-1-pro".to_string(),
            frame: "lucataco/frame-extractor:c02b3c1df64728476b1c21b0876235119e6ac08b0c9b8a99b82c5f0e0d42442d".to_string(),
            sound: "zsxkib/mmaudio:62871fb59889b2d7c13777f08deb3b36bdff88f7e1d53a50ad7694548a41b484".to_string(),
        }
    }
}

/// Replicate API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ReplicateSettings {
    /// API root, without a trailing slash
    base_url: String,
    /// Per-stage model identifiers
    models: ReplicateModels,
    /// Delay between status polls
    poll_interval_ms: u64,
    /// Longest time to wait for one prediction
    max_wait_secs: u64,
    /// Timeout for a single HTTP request
    request_timeout_secs: u64,
}

impl Default for ReplicateSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.replicate.com/v1".to_string(),
            models: ReplicateModels::default(),
            poll_interval_ms: 2000,
            max_wait_secs: 600,
            request_timeout_secs: 120,
        }
    }
}

impl ReplicateSettings {
    /// Point the client at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the model identifiers.
    pub fn with_models(mut self, models: ReplicateModels) -> Self {
        self.models = models;
        self
    }
}
