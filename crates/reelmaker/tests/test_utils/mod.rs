//! Test utilities for facade tests.
//!
//! `Backstage` stands in for every generation stage at once, and
//! `ScriptedText` replays storyboard responses in order.

#![allow(dead_code)]

use async_trait::async_trait;
use reelmaker::{
    ArtifactReference, ClipDownloader, ClipMerger, FrameExtractor, ImageGenerator, ImageRequest,
    ModelError, ReelConfig, ReelResult, SoundOverlay, StageSet, Studio, TextGenerator,
    TextRequest, VideoGenerator,
};
use serde_json::json;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A valid storyboard document with twelve scenes.
pub fn storyboard_json() -> String {
    let scenes: Vec<_> = (1..=12)
        .map(|n| {
            if n == 1 {
                json!({"setting": "A quiet harbour at dawn", "description": format!("The keeper does thing {}.", n)})
            } else {
                json!({"description": format!("The keeper does thing {}.", n)})
            }
        })
        .collect();
    json!({
        "characters": [{"name": "Ansel", "description": "An old lighthouse keeper in a yellow coat"}],
        "sound_effect": "waves",
        "scenes": scenes,
    })
    .to_string()
}

/// Replays scripted storyboard responses and records every request.
#[derive(Default)]
pub struct ScriptedText {
    responses: Mutex<VecDeque<ReelResult<String>>>,
    requests: Mutex<Vec<TextRequest>>,
}

impl ScriptedText {
    /// Reply with each response in turn.
    pub fn scripted(responses: Vec<ReelResult<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of generation calls so far.
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<TextRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedText {
    async fn generate_text(&self, request: &TextRequest) -> ReelResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::new("script exhausted").into()))
    }

    fn model_name(&self) -> &str {
        "scripted-storyboard"
    }
}

/// Every generation stage, succeeding with predictable locators.
#[derive(Default)]
pub struct Backstage {
    videos: AtomicUsize,
}

impl Backstage {
    /// Videos generated so far.
    pub fn videos(&self) -> usize {
        self.videos.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for Backstage {
    async fn generate_text(&self, request: &TextRequest) -> ReelResult<String> {
        Ok(format!(
            "A detailed cinematic rendering, soft morning light, film grain. {}",
            request.prompt().len()
        ))
    }

    fn model_name(&self) -> &str {
        "backstage"
    }
}

#[async_trait]
impl ImageGenerator for Backstage {
    async fn generate_image(&self, request: &ImageRequest) -> ReelResult<ArtifactReference> {
        ArtifactReference::parse(format!(
            "https://images.test/{}-refs.png",
            request.references().len()
        ))
    }
}

#[async_trait]
impl VideoGenerator for Backstage {
    async fn generate_video(
        &self,
        _prompt: &str,
        _initial_image: &ArtifactReference,
    ) -> ReelResult<ArtifactReference> {
        let n = self.videos.fetch_add(1, Ordering::SeqCst) + 1;
        ArtifactReference::parse(format!("https://videos.test/scene-{}.mp4", n))
    }
}

#[async_trait]
impl FrameExtractor for Backstage {
    async fn extract_frame(&self, video: &ArtifactReference) -> ReelResult<ArtifactReference> {
        ArtifactReference::parse(format!("{}.frame.png", video))
    }
}

#[async_trait]
impl SoundOverlay for Backstage {
    async fn overlay_sound(
        &self,
        video: &ArtifactReference,
        _tag: &str,
    ) -> ReelResult<ArtifactReference> {
        ArtifactReference::parse(format!("{}?sound=1", video))
    }
}

/// Serves each locator's own text as its bytes.
pub struct EchoDownloader;

#[async_trait]
impl ClipDownloader for EchoDownloader {
    async fn download(&self, source: &ArtifactReference, _timeout: Duration) -> ReelResult<Vec<u8>> {
        Ok(format!("{}\n", source).into_bytes())
    }
}

/// Concatenates clip files byte for byte.
pub struct CatMerger;

#[async_trait]
impl ClipMerger for CatMerger {
    async fn merge(&self, clips: &[PathBuf], output: &Path) -> ReelResult<PathBuf> {
        let mut joined = Vec::new();
        for clip in clips {
            joined.extend(std::fs::read(clip).unwrap());
        }
        std::fs::write(output, joined).unwrap();
        Ok(output.to_path_buf())
    }
}

/// Configuration writing reels under `output_dir` with fast retries.
pub fn config(output_dir: &Path) -> ReelConfig {
    ReelConfig::from_toml(&format!(
        r#"
        [retry]
        max_attempts = 3
        initial_backoff_ms = 1
        max_delay_secs = 1

        [output]
        directory = "{}"
        "#,
        output_dir.display()
    ))
    .unwrap()
}

/// A studio wired to `text` for storyboards and `Backstage` for scenes.
pub fn studio(config: ReelConfig, text: Arc<ScriptedText>, backstage: Arc<Backstage>) -> Studio {
    let stages = StageSet::builder()
        .text(backstage.clone())
        .image(backstage.clone())
        .video(backstage.clone())
        .frames(backstage.clone())
        .sound(backstage)
        .build()
        .unwrap();
    Studio::new(
        config,
        text,
        stages,
        Arc::new(EchoDownloader),
        Arc::new(CatMerger),
    )
}
