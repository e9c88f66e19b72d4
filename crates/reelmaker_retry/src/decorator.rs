//! Retrying wrappers around stage adapters.

use crate::{RetryPolicy, retry_operation};
use async_trait::async_trait;
use reelmaker_core::{ArtifactReference, ImageRequest, TextRequest};
use reelmaker_error::ReelResult;
use reelmaker_interface::{
    ClipDownloader, ClipMerger, FrameExtractor, ImageGenerator, SoundOverlay, TextGenerator,
    VideoGenerator,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Wraps a stage adapter so every call is retried per a [`RetryPolicy`].
///
/// The orchestrator never retries on its own. Handing it `Retrying` stages
/// is how a caller opts in.
///
/// # Examples
///
/// ```ignore
/// let video = Arc::new(Retrying::new(replicate.clone(), policy.clone()));
/// ```
#[derive(Debug, Clone)]
pub struct Retrying<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S> Retrying<S> {
    /// Wrap `inner` with `policy`.
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// The wrapped adapter.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// The retry policy in force.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[async_trait]
impl<S: TextGenerator> TextGenerator for Retrying<S> {
    async fn generate_text(&self, request: &TextRequest) -> ReelResult<String> {
        retry_operation(&self.policy, "generate_text", || {
            self.inner.generate_text(request)
        })
        .await
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}

#[async_trait]
impl<S: ImageGenerator> ImageGenerator for Retrying<S> {
    async fn generate_image(&self, request: &ImageRequest) -> ReelResult<ArtifactReference> {
        retry_operation(&self.policy, "generate_image", || {
            self.inner.generate_image(request)
        })
        .await
    }
}

#[async_trait]
impl<S: VideoGenerator> VideoGenerator for Retrying<S> {
    async fn generate_video(
        &self,
        prompt: &str,
        initial_image: &ArtifactReference,
    ) -> ReelResult<ArtifactReference> {
        retry_operation(&self.policy, "generate_video", || {
            self.inner.generate_video(prompt, initial_image)
        })
        .await
    }
}

#[async_trait]
impl<S: FrameExtractor> FrameExtractor for Retrying<S> {
    async fn extract_frame(&self, video: &ArtifactReference) -> ReelResult<ArtifactReference> {
        retry_operation(&self.policy, "extract_frame", || {
            self.inner.extract_frame(video)
        })
        .await
    }
}

#[async_trait]
impl<S: SoundOverlay> SoundOverlay for Retrying<S> {
    async fn overlay_sound(
        &self,
        video: &ArtifactReference,
        tag: &str,
    ) -> ReelResult<ArtifactReference> {
        retry_operation(&self.policy, "overlay_sound", || {
            self.inner.overlay_sound(video, tag)
        })
        .await
    }
}

#[async_trait]
impl<S: ClipDownloader> ClipDownloader for Retrying<S> {
    async fn download(&self, source: &ArtifactReference, timeout: Duration) -> ReelResult<Vec<u8>> {
        retry_operation(&self.policy, "download", || {
            self.inner.download(source, timeout)
        })
        .await
    }
}

#[async_trait]
impl<S: ClipMerger> ClipMerger for Retrying<S> {
    async fn merge(&self, clips: &[PathBuf], output: &Path) -> ReelResult<PathBuf> {
        retry_operation(&self.policy, "merge", || self.inner.merge(clips, output)).await
    }
}
