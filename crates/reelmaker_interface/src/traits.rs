//! Stage contracts.

use async_trait::async_trait;
use reelmaker_core::{ArtifactReference, ImageRequest, TextRequest};
use reelmaker_error::ReelResult;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Text generation (storyboards and prompt expansion).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for the request, returning the concatenated output.
    ///
    /// Fails with a transport error when the model cannot be reached or the
    /// credentials are rejected.
    async fn generate_text(&self, request: &TextRequest) -> ReelResult<String>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}

/// Image generation and composition.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate an image from a prompt and optional reference images.
    async fn generate_image(&self, request: &ImageRequest) -> ReelResult<ArtifactReference>;
}

/// Image-to-video generation.
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    /// Generate a short clip that starts from `initial_image`.
    async fn generate_video(
        &self,
        prompt: &str,
        initial_image: &ArtifactReference,
    ) -> ReelResult<ArtifactReference>;
}

/// Representative-frame extraction from a clip.
#[async_trait]
pub trait FrameExtractor: Send + Sync {
    /// Extract a still frame from `video`.
    async fn extract_frame(&self, video: &ArtifactReference) -> ReelResult<ArtifactReference>;
}

/// Ambient sound overlay.
#[async_trait]
pub trait SoundOverlay: Send + Sync {
    /// Return a copy of `video` with ambient sound described by `tag`.
    async fn overlay_sound(
        &self,
        video: &ArtifactReference,
        tag: &str,
    ) -> ReelResult<ArtifactReference>;
}

/// Fetches artifact bytes for local processing.
#[async_trait]
pub trait ClipDownloader: Send + Sync {
    /// Download `source`, failing if it takes longer than `timeout`.
    async fn download(&self, source: &ArtifactReference, timeout: Duration) -> ReelResult<Vec<u8>>;
}

/// Concatenates local clips into one file.
#[async_trait]
pub trait ClipMerger: Send + Sync {
    /// Concatenate `clips` in order, writing the result to `output`.
    ///
    /// Returns the path of the written file.
    async fn merge(&self, clips: &[PathBuf], output: &Path) -> ReelResult<PathBuf>;
}

// Blanket impls so shared adapters can be handed around as `Arc<T>`.
#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    async fn generate_text(&self, request: &TextRequest) -> ReelResult<String> {
        (**self).generate_text(request).await
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<T: ImageGenerator + ?Sized> ImageGenerator for Arc<T> {
    async fn generate_image(&self, request: &ImageRequest) -> ReelResult<ArtifactReference> {
        (**self).generate_image(request).await
    }
}

#[async_trait]
impl<T: VideoGenerator + ?Sized> VideoGenerator for Arc<T> {
    async fn generate_video(
        &self,
        prompt: &str,
        initial_image: &ArtifactReference,
    ) -> ReelResult<ArtifactReference> {
        (**self).generate_video(prompt, initial_image).await
    }
}

#[async_trait]
impl<T: FrameExtractor + ?Sized> FrameExtractor for Arc<T> {
    async fn extract_frame(&self, video: &ArtifactReference) -> ReelResult<ArtifactReference> {
        (**self).extract_frame(video).await
    }
}

#[async_trait]
impl<T: SoundOverlay + ?Sized> SoundOverlay for Arc<T> {
    async fn overlay_sound(
        &self,
        video: &ArtifactReference,
        tag: &str,
    ) -> ReelResult<ArtifactReference> {
        (**self).overlay_sound(video, tag).await
    }
}

#[async_trait]
impl<T: ClipDownloader + ?Sized> ClipDownloader for Arc<T> {
    async fn download(&self, source: &ArtifactReference, timeout: Duration) -> ReelResult<Vec<u8>> {
        (**self).download(source, timeout).await
    }
}

#[async_trait]
impl<T: ClipMerger + ?Sized> ClipMerger for Arc<T> {
    async fn merge(&self, clips: &[PathBuf], output: &Path) -> ReelResult<PathBuf> {
        (**self).merge(clips, output).await
    }
}
