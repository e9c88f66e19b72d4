//! Test utilities for pipeline tests.
//!
//! Every stage mock records what it was asked to do and can be told to fail
//! for particular scenes. Artifact locators encode where they came from, so
//! assertions can follow the continuity chain.

#![allow(dead_code)]

use async_trait::async_trait;
use reelmaker_core::{
    ArtifactReference, AspectRatio, Character, ImageRequest, SCENE_COUNT, SceneDescriptor,
    StoryboardPlan, TextRequest,
};
use reelmaker_error::{CodecError, ModelError, ReelResult, TransportError, TransportErrorKind};
use reelmaker_interface::{
    ClipDownloader, ClipMerger, FrameExtractor, ImageGenerator, SoundOverlay, TextGenerator,
    VideoGenerator,
};
use reelmaker_pipeline::{MergeAssembler, SceneOrchestrator, StageSet};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Plan whose scene descriptions start with `Scene {n}:`.
pub fn plan() -> StoryboardPlan {
    plan_with_setting("A small attic room with rain streaking the window")
}

/// Plan with a custom scene 1 setting.
pub fn plan_with_setting(setting: &str) -> StoryboardPlan {
    let scenes = (1..=SCENE_COUNT)
        .map(|n| {
            SceneDescriptor::new(
                n,
                if n == 1 { setting } else { "" },
                format!("Scene {}: The person moves.", n),
            )
        })
        .collect();
    StoryboardPlan::new(
        Character::new("Mira", "A woman in her thirties in a green sweater"),
        "rain",
        scenes,
    )
    .expect("valid plan")
}

/// Scene number encoded in a description or locator such as `scene-4`.
pub fn scene_of(text: &str) -> usize {
    let digits: String = text
        .split(|c: char| matches!(c, ' ' | '-' | ':' | '/'))
        .skip_while(|part| !part.eq_ignore_ascii_case("scene"))
        .nth(1)
        .unwrap_or_default()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().expect("scene number in text")
}

fn artifact(locator: String) -> ArtifactReference {
    ArtifactReference::parse(locator).expect("valid locator")
}

/// Expands any prompt into a long enough description.
#[derive(Default)]
pub struct MockText {
    /// Fail requests whose prompt contains this marker
    pub fail_marker: Mutex<Option<&'static str>>,
    /// Reply with text this short for prompts containing the marker
    pub short_marker: Mutex<Option<&'static str>>,
    pub prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl TextGenerator for MockText {
    async fn generate_text(&self, request: &TextRequest) -> ReelResult<String> {
        let prompt = request.prompt().clone();
        self.prompts.lock().unwrap().push(prompt.clone());
        if let Some(marker) = *self.fail_marker.lock().unwrap() {
            if prompt.contains(marker) {
                return Err(TransportError::new(TransportErrorKind::Status {
                    status_code: 503,
                    message: "unavailable".to_string(),
                })
                .into());
            }
        }
        if let Some(marker) = *self.short_marker.lock().unwrap() {
            if prompt.contains(marker) {
                return Ok("tiny".to_string());
            }
        }
        Ok(format!(
            "```\nA detailed cinematic prompt with plenty of descriptive words for: {}\n```",
            prompt.lines().find(|l| l.contains(':')).unwrap_or("unknown")
        ))
    }

    fn model_name(&self) -> &str {
        "mock-text"
    }
}

/// Names images after the request shape.
#[derive(Default)]
pub struct MockImage {
    pub fail_kind: Mutex<Option<&'static str>>,
    pub requests: Mutex<Vec<ImageRequest>>,
}

#[async_trait]
impl ImageGenerator for MockImage {
    async fn generate_image(&self, request: &ImageRequest) -> ReelResult<ArtifactReference> {
        self.requests.lock().unwrap().push(request.clone());
        let kind = match (request.references().len(), request.aspect_ratio()) {
            (0, AspectRatio::Square) => "character",
            (0, _) => "setting",
            _ => "composite",
        };
        if *self.fail_kind.lock().unwrap() == Some(kind) {
            return Err(ModelError::new(format!("no {} image", kind)).into());
        }
        Ok(artifact(format!("https://img.test/{}.png", kind)))
    }
}

/// Produces `https://video.test/scene-{n}.mp4`.
#[derive(Default)]
pub struct MockVideo {
    pub fail_scenes: Mutex<HashSet<usize>>,
    /// (scene, initial image) per call
    pub calls: Mutex<Vec<(usize, ArtifactReference)>>,
}

impl MockVideo {
    /// Reference image passed for a scene, if video generation was attempted.
    pub fn reference_for(&self, scene: usize) -> Option<ArtifactReference> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(n, _)| *n == scene)
            .map(|(_, image)| image.clone())
    }

    pub fn scenes_attempted(&self) -> Vec<usize> {
        self.calls.lock().unwrap().iter().map(|(n, _)| *n).collect()
    }
}

#[async_trait]
impl VideoGenerator for MockVideo {
    async fn generate_video(
        &self,
        prompt: &str,
        initial_image: &ArtifactReference,
    ) -> ReelResult<ArtifactReference> {
        let scene = scene_of(prompt);
        self.calls
            .lock()
            .unwrap()
            .push((scene, initial_image.clone()));
        if self.fail_scenes.lock().unwrap().contains(&scene) {
            return Err(ModelError::new("video model returned nothing").into());
        }
        Ok(artifact(format!("https://video.test/scene-{}.mp4", scene)))
    }
}

/// Produces `https://frame.test/scene-{n}.png` from scene `n`'s video.
#[derive(Default)]
pub struct MockFrames {
    /// Scenes whose continuity step fails (extraction from the previous video)
    pub fail_for_scenes: Mutex<HashSet<usize>>,
    pub extracted_from: Mutex<Vec<ArtifactReference>>,
}

#[async_trait]
impl FrameExtractor for MockFrames {
    async fn extract_frame(&self, video: &ArtifactReference) -> ReelResult<ArtifactReference> {
        self.extracted_from.lock().unwrap().push(video.clone());
        let source_scene = scene_of(video.as_str());
        if self
            .fail_for_scenes
            .lock()
            .unwrap()
            .contains(&(source_scene + 1))
        {
            return Err(TransportError::new(TransportErrorKind::Timeout(60)).into());
        }
        Ok(artifact(format!("https://frame.test/scene-{}.png", source_scene)))
    }
}

/// Produces `https://sound.test/scene-{n}.mp4`.
#[derive(Default)]
pub struct MockSound {
    pub fail_scenes: Mutex<HashSet<usize>>,
    pub tags: Mutex<Vec<String>>,
}

#[async_trait]
impl SoundOverlay for MockSound {
    async fn overlay_sound(
        &self,
        video: &ArtifactReference,
        tag: &str,
    ) -> ReelResult<ArtifactReference> {
        self.tags.lock().unwrap().push(tag.to_string());
        let scene = scene_of(video.as_str());
        if self.fail_scenes.lock().unwrap().contains(&scene) {
            return Err(ModelError::new("sound model returned a non-URL").into());
        }
        Ok(artifact(format!("https://sound.test/scene-{}.mp4", scene)))
    }
}

/// Returns the locator text as the clip body.
#[derive(Default)]
pub struct MockDownloader {
    /// Fail when downloading this locator
    pub fail_on: Mutex<Option<String>>,
    pub downloads: Mutex<Vec<ArtifactReference>>,
}

#[async_trait]
impl ClipDownloader for MockDownloader {
    async fn download(&self, source: &ArtifactReference, _timeout: Duration) -> ReelResult<Vec<u8>> {
        self.downloads.lock().unwrap().push(source.clone());
        if self.fail_on.lock().unwrap().as_deref() == Some(source.as_str()) {
            return Err(TransportError::new(TransportErrorKind::Status {
                status_code: 404,
                message: "gone".to_string(),
            })
            .into());
        }
        Ok(source.as_str().as_bytes().to_vec())
    }
}

/// Concatenates clip bodies line by line into the output file.
#[derive(Default)]
pub struct MockMerger {
    pub fail: Mutex<bool>,
    /// Clip paths of the last merge call
    pub clips: Mutex<Vec<PathBuf>>,
}

#[async_trait]
impl ClipMerger for MockMerger {
    async fn merge(&self, clips: &[PathBuf], output: &Path) -> ReelResult<PathBuf> {
        *self.clips.lock().unwrap() = clips.to_vec();
        if *self.fail.lock().unwrap() {
            return Err(CodecError::new("ffmpeg exited with status 1").into());
        }
        let mut merged = Vec::new();
        for clip in clips {
            merged.push(std::fs::read_to_string(clip).expect("clip exists during merge"));
        }
        std::fs::write(output, merged.join("\n")).expect("write merged output");
        Ok(output.to_path_buf())
    }
}

/// All mocks plus a scratch output directory.
pub struct Harness {
    pub text: Arc<MockText>,
    pub image: Arc<MockImage>,
    pub video: Arc<MockVideo>,
    pub frames: Arc<MockFrames>,
    pub sound: Arc<MockSound>,
    pub downloader: Arc<MockDownloader>,
    pub merger: Arc<MockMerger>,
    pub output_dir: tempfile::TempDir,
    pub scratch_dir: tempfile::TempDir,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            text: Arc::new(MockText::default()),
            image: Arc::new(MockImage::default()),
            video: Arc::new(MockVideo::default()),
            frames: Arc::new(MockFrames::default()),
            sound: Arc::new(MockSound::default()),
            downloader: Arc::new(MockDownloader::default()),
            merger: Arc::new(MockMerger::default()),
            output_dir: tempfile::tempdir().expect("output dir"),
            scratch_dir: tempfile::tempdir().expect("scratch dir"),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.path().join("reels").join("final.mp4")
    }

    pub fn assembler(&self) -> MergeAssembler {
        self.assembler_to(self.output_path())
    }

    pub fn assembler_to(&self, output_path: PathBuf) -> MergeAssembler {
        MergeAssembler::new(self.downloader.clone(), self.merger.clone(), output_path)
            .with_scratch_root(self.scratch_dir.path())
    }

    /// Entries left in the scratch root.
    pub fn scratch_entries(&self) -> usize {
        std::fs::read_dir(self.scratch_dir.path())
            .expect("scratch dir readable")
            .count()
    }

    pub fn orchestrator(&self) -> SceneOrchestrator {
        let stages = StageSet::builder()
            .text(self.text.clone())
            .image(self.image.clone())
            .video(self.video.clone())
            .frames(self.frames.clone())
            .sound(self.sound.clone())
            .build()
            .expect("all stages set");
        SceneOrchestrator::new(stages, self.assembler())
    }
}
