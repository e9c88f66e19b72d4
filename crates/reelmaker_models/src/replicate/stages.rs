//! Stage adapters backed by Replicate models.

use crate::replicate::{
    ReplicateClient, decode_artifact, decode_remote_artifact, decode_text,
};
use async_trait::async_trait;
use reelmaker_core::{ArtifactReference, AspectRatio, ImageRequest, TextRequest};
use reelmaker_error::{ReelResult, ValidationError};
use reelmaker_interface::{
    FrameExtractor, ImageGenerator, SoundOverlay, TextGenerator, VideoGenerator,
};
use serde_json::{Value as JsonValue, json};
use tracing::{debug, instrument};

/// Input for the text model.
pub fn text_input(request: &TextRequest) -> JsonValue {
    let sampling = request.sampling();
    json!({
        "prompt": request.prompt(),
        "temperature": sampling.temperature(),
        "top_p": sampling.top_p(),
        "max_output_tokens": sampling.max_output_tokens(),
        "dynamic_thinking": false,
    })
}

/// Input for single-prompt image generation.
pub fn image_input(request: &ImageRequest) -> JsonValue {
    json!({
        "prompt": request.prompt(),
        "aspect_ratio": request.aspect_ratio().to_string(),
        "number_of_images": 1,
        "prompt_optimizer": true,
    })
}

/// Input for two-image composition.
///
/// # Errors
///
/// Returns a validation error unless exactly two references are given.
pub fn composite_input(request: &ImageRequest) -> ReelResult<JsonValue> {
    let [first, second] = request.references().as_slice() else {
        return Err(ValidationError::new(format!(
            "image composition takes 2 references, got {}",
            request.references().len()
        ))
        .into());
    };
    Ok(json!({
        "prompt": request.prompt(),
        "aspect_ratio": request.aspect_ratio().to_string(),
        "input_image_1": first.as_str(),
        "input_image_2": second.as_str(),
        "output_format": "png",
        "safety_tolerance": 2,
    }))
}

/// Input for image-to-video generation.
pub fn video_input(prompt: &str, initial_image: &ArtifactReference) -> JsonValue {
    json!({
        "prompt": prompt,
        "image": initial_image.as_str(),
        "fps": 24,
        "duration": 5,
        "resolution": "480p",
        "aspect_ratio": AspectRatio::Widescreen.to_string(),
        "camera_fixed": false,
    })
}

/// Input for frame extraction.
pub fn frame_input(video: &ArtifactReference) -> JsonValue {
    json!({
        "video": video.as_str(),
        "return_first_frame": false,
    })
}

/// Input for the sound overlay model.
pub fn sound_input(video: &ArtifactReference, tag: &str) -> JsonValue {
    json!({
        "video": video.as_str(),
        "prompt": tag,
        "negative_prompt": "music",
        "duration": 5,
        "num_steps": 25,
        "cfg_strength": 4.5,
        "seed": -1,
    })
}

#[async_trait]
impl TextGenerator for ReplicateClient {
    #[instrument(skip(self, request), fields(prompt_len = request.prompt().len()))]
    async fn generate_text(&self, request: &TextRequest) -> ReelResult<String> {
        let output = self
            .run(self.settings().models().text(), text_input(request))
            .await?;
        let text = decode_text(&output)?;
        debug!(response_len = text.len(), "Text generated");
        Ok(text)
    }

    fn model_name(&self) -> &str {
        self.settings().models().text()
    }
}

#[async_trait]
impl ImageGenerator for ReplicateClient {
    #[instrument(skip(self, request), fields(references = request.references().len(), aspect_ratio = %request.aspect_ratio()))]
    async fn generate_image(&self, request: &ImageRequest) -> ReelResult<ArtifactReference> {
        let models = self.settings().models();
        let output = if request.references().is_empty() {
            self.run(models.image(), image_input(request)).await?
        } else {
            self.run(models.composite(), composite_input(request)?).await?
        };
        decode_artifact(&output)
    }
}

#[async_trait]
impl VideoGenerator for ReplicateClient {
    #[instrument(skip_all, fields(initial_image = %initial_image))]
    async fn generate_video(
        &self,
        prompt: &str,
        initial_image: &ArtifactReference,
    ) -> ReelResult<ArtifactReference> {
        let output = self
            .run(self.settings().models().video(), video_input(prompt, initial_image))
            .await?;
        decode_artifact(&output)
    }
}

#[async_trait]
impl FrameExtractor for ReplicateClient {
    #[instrument(skip_all, fields(video = %video))]
    async fn extract_frame(&self, video: &ArtifactReference) -> ReelResult<ArtifactReference> {
        let output = self
            .run(self.settings().models().frame(), frame_input(video))
            .await?;
        decode_artifact(&output)
    }
}

#[async_trait]
impl SoundOverlay for ReplicateClient {
    #[instrument(skip_all, fields(video = %video, tag = %tag))]
    async fn overlay_sound(
        &self,
        video: &ArtifactReference,
        tag: &str,
    ) -> ReelResult<ArtifactReference> {
        let output = self
            .run(self.settings().models().sound(), sound_input(video, tag))
            .await?;
        decode_remote_artifact(&output)
    }
}
