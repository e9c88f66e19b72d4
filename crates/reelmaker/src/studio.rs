//! Wiring from configuration to a ready-to-run interpreter and orchestrator.

use crate::ReelConfig;
use reelmaker_core::{StoryIdea, StoryboardPlan};
use reelmaker_error::{BuilderError, JsonError, ReelResult, StorageError, StorageErrorKind};
use reelmaker_interface::{
    ClipDownloader, ClipMerger, FrameExtractor, ImageGenerator, SoundOverlay, TextGenerator,
    VideoGenerator,
};
use reelmaker_models::{FfmpegMerger, HttpDownloader, ReplicateClient};
use reelmaker_pipeline::{MergeAssembler, PipelineRun, SceneOrchestrator, StageSet};
use reelmaker_retry::{RetryPolicy, Retrying, retry_operation};
use reelmaker_storyboard::{Interpretation, StoryboardInterpreter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

/// Interpret an idea, retrying the whole call on retryable failures.
///
/// Truncated and unparseable storyboards count as retryable here since
/// a fresh generation usually comes back whole.
#[instrument(skip_all, fields(idea_len = idea.as_str().len()))]
pub async fn interpret_with_retry<G: TextGenerator>(
    interpreter: &StoryboardInterpreter<G>,
    policy: &RetryPolicy,
    idea: &StoryIdea,
) -> ReelResult<Interpretation> {
    retry_operation(policy, "interpret_storyboard", || interpreter.interpret(idea)).await
}

/// Wrap each stage of `stage` in the retry policy.
///
/// # Errors
///
/// Only fails if the stage set cannot be assembled.
pub fn retrying_stages<S>(stage: S, policy: &RetryPolicy) -> ReelResult<StageSet>
where
    S: TextGenerator
        + ImageGenerator
        + VideoGenerator
        + FrameExtractor
        + SoundOverlay
        + 'static,
{
    let wrapped = Arc::new(Retrying::new(stage, policy.clone()));
    let stages = StageSet::builder()
        .text(wrapped.clone())
        .image(wrapped.clone())
        .video(wrapped.clone())
        .frames(wrapped.clone())
        .sound(wrapped)
        .build()
        .map_err(|e| BuilderError::incomplete("stage set", e))?;
    Ok(stages)
}

/// Configured entry point for storyboard interpretation and full runs.
#[derive(Clone)]
pub struct Studio {
    config: ReelConfig,
    text: Arc<dyn TextGenerator>,
    stages: StageSet,
    downloader: Arc<dyn ClipDownloader>,
    merger: Arc<dyn ClipMerger>,
}

impl Studio {
    /// Assemble a studio from explicit collaborators.
    pub fn new(
        config: ReelConfig,
        text: Arc<dyn TextGenerator>,
        stages: StageSet,
        downloader: Arc<dyn ClipDownloader>,
        merger: Arc<dyn ClipMerger>,
    ) -> Self {
        Self {
            config,
            text,
            stages,
            downloader,
            merger,
        }
    }

    /// Build the production studio backed by Replicate and ffmpeg.
    ///
    /// The storyboard generator is left unwrapped: interpretation is
    /// retried as a whole by [`Studio::storyboard`].
    ///
    /// # Errors
    ///
    /// Fails if `REPLICATE_API_TOKEN` is missing.
    pub fn replicate(config: ReelConfig) -> ReelResult<Self> {
        let client = Arc::new(ReplicateClient::from_env(config.replicate().clone())?);
        let stages = retrying_stages(client.clone(), config.retry())?;
        let merger = FfmpegMerger::new(config.merge().ffmpeg().clone());
        Ok(Self::new(
            config,
            client,
            stages,
            Arc::new(HttpDownloader::new()),
            Arc::new(merger),
        ))
    }

    /// The configuration in force.
    pub fn config(&self) -> &ReelConfig {
        &self.config
    }

    /// Interpret an idea into a storyboard plan.
    pub async fn storyboard(&self, idea: &StoryIdea) -> ReelResult<Interpretation> {
        let interpreter = StoryboardInterpreter::new(self.text.clone())
            .with_sampling(*self.config.sampling().storyboard());
        interpret_with_retry(&interpreter, self.config.retry(), idea).await
    }

    /// An orchestrator that writes its merged reel to `output_path`.
    pub fn orchestrator(&self, output_path: impl Into<PathBuf>) -> SceneOrchestrator {
        let assembler = MergeAssembler::new(
            self.downloader.clone(),
            self.merger.clone(),
            output_path,
        )
        .with_download_timeout(self.config.output().download_timeout());
        SceneOrchestrator::new(self.stages.clone(), assembler)
            .with_expansions(self.config.sampling().expansions())
    }

    /// Produce every scene of `plan` and merge them under `run_id`.
    #[instrument(skip(self, plan), fields(character = %plan.character().name))]
    pub async fn produce(&self, plan: &StoryboardPlan, run_id: &str) -> ReelResult<PipelineRun> {
        let output_path = self.config.output().reel_path(run_id);
        info!(output = %output_path.display(), "Starting scene pipeline");
        self.orchestrator(output_path).run(plan).await
    }

    /// Where a run's merged reel is written.
    pub fn reel_path(&self, run_id: &str) -> PathBuf {
        self.config.output().reel_path(run_id)
    }
}

/// Load a storyboard plan saved by `reelmaker storyboard --out`.
///
/// # Errors
///
/// Fails if the file cannot be read or is not a valid plan.
pub async fn load_plan(path: &Path) -> ReelResult<StoryboardPlan> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", path.display(), e)))
    })?;
    let plan = serde_json::from_str(&text)
        .map_err(|e| JsonError::new(format!("invalid plan file: {}", e)))?;
    Ok(plan)
}
