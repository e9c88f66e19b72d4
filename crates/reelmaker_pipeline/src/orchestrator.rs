//! The scene pipeline orchestrator.
//!
//! A run bootstraps the character and the scene 1 setting, composes the
//! scene 1 reference image, then folds over the scenes in order. Each scene
//! after the first starts from a frame of the previous scene's video, so the
//! scenes form a strict chain and are never processed in parallel.

use crate::{
    Expansion, ExpansionSet, MergeAssembler, PipelineRun, PipelineState, Segment, Stage, StageOutcome,
    character_prompt, combine_prompt, setting_prompt,
};
use futures::stream::{self, TryStreamExt};
use reelmaker_core::{
    ArtifactReference, Character, ImageRequest, SceneDescriptor, StoryboardPlan, TextRequest,
};
use reelmaker_error::{
    BuilderError, PipelineError, PipelineErrorKind, ReelError, ReelResult,
};
use reelmaker_interface::{
    FrameExtractor, ImageGenerator, SoundOverlay, TextGenerator, VideoGenerator,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// The generation stages a run calls out to.
#[derive(Clone, derive_builder::Builder)]
pub struct StageSet {
    /// Prompt expansion
    text: Arc<dyn TextGenerator>,
    /// Character, setting and composite images
    image: Arc<dyn ImageGenerator>,
    /// Image-to-video
    video: Arc<dyn VideoGenerator>,
    /// Frame extraction for continuity
    frames: Arc<dyn FrameExtractor>,
    /// Ambient sound overlay
    sound: Arc<dyn SoundOverlay>,
}

impl StageSet {
    /// Start building a stage set.
    pub fn builder() -> StageSetBuilder {
        StageSetBuilder::default()
    }
}

/// Turns a storyboard plan into video segments and a merged reel.
///
/// No stage call is retried here. Wrap the stages in a retrying decorator
/// to get retries.
#[derive(Clone)]
pub struct SceneOrchestrator {
    stages: StageSet,
    assembler: MergeAssembler,
    expansions: ExpansionSet,
}

impl SceneOrchestrator {
    /// Create an orchestrator.
    pub fn new(stages: StageSet, assembler: MergeAssembler) -> Self {
        Self {
            stages,
            assembler,
            expansions: ExpansionSet::default(),
        }
    }

    /// Override the prompt-expansion settings.
    pub fn with_expansions(mut self, expansions: ExpansionSet) -> Self {
        self.expansions = expansions;
        self
    }

    /// Run every scene of the plan and merge the results.
    ///
    /// Frame extraction and video generation failures drop their scene.
    /// Sound overlay failures keep the scene with its raw video. A failed
    /// merge still returns the individual segments as a partial result.
    ///
    /// # Errors
    ///
    /// Returns a [`PipelineError`] if:
    /// - The character prompt or image cannot be produced
    /// - Scene 1 has no setting, or its setting or composite image cannot be produced
    /// - Fewer than two segments survive the scene loop
    #[instrument(
        skip(self, plan),
        fields(character = %plan.character().name, sound_tag = %plan.sound_tag())
    )]
    pub async fn run(&self, plan: &StoryboardPlan) -> ReelResult<PipelineRun> {
        let opening = plan.opening_scene();
        let sound_tag = plan.sound_tag().as_str();

        // Both steps must finish before scene 1 can be composed
        let (character_image, setting_image) = tokio::try_join!(
            self.bootstrap_character(plan.character()),
            self.establish_setting(opening),
        )?;
        let reference = self
            .compose_opening(opening, character_image, setting_image)
            .await?;

        let state = self
            .shoot(PipelineState::new(reference), opening, sound_tag)
            .await?;
        let state = stream::iter(plan.scenes().iter().skip(1).map(Ok::<_, ReelError>))
            .try_fold(state, |state, scene| self.continue_scene(state, scene, sound_tag))
            .await?;

        self.assemble(state).await
    }

    async fn bootstrap_character(&self, character: &Character) -> ReelResult<ArtifactReference> {
        let expansion = self.expansions.character;
        let prompt = self
            .expand(Stage::CharacterPrompt, &expansion, character_prompt(character))
            .await?;
        let image = self
            .render(Stage::CharacterImage, &expansion, prompt, Vec::new())
            .await?;
        info!(image = %image, "Character ready");
        Ok(image)
    }

    async fn establish_setting(&self, scene: &SceneDescriptor) -> ReelResult<ArtifactReference> {
        if !scene.has_setting() {
            error!(scene = scene.index, "Opening scene has no setting");
            return Err(PipelineError::new(PipelineErrorKind::SceneSetup(
                "scene 1 has no setting".to_string(),
            ))
            .into());
        }
        let expansion = self.expansions.setting;
        let prompt = self
            .expand(Stage::SettingPrompt, &expansion, setting_prompt(&scene.setting))
            .await?;
        let image = self
            .render(Stage::SettingImage, &expansion, prompt, Vec::new())
            .await?;
        info!(image = %image, "Setting ready");
        Ok(image)
    }

    async fn compose_opening(
        &self,
        scene: &SceneDescriptor,
        character_image: ArtifactReference,
        setting_image: ArtifactReference,
    ) -> ReelResult<ArtifactReference> {
        let expansion = self.expansions.combine;
        let prompt = self
            .expand(Stage::CombinePrompt, &expansion, combine_prompt(&scene.description))
            .await?;
        let image = self
            .render(
                Stage::CombineImage,
                &expansion,
                prompt,
                vec![character_image, setting_image],
            )
            .await?;
        info!(image = %image, "Scene 1 reference ready");
        Ok(image)
    }

    /// Generate an expanded prompt for a scene 1 stage.
    async fn expand(
        &self,
        stage: Stage,
        expansion: &Expansion,
        instructions: String,
    ) -> ReelResult<String> {
        let request = TextRequest::builder()
            .prompt(instructions)
            .sampling(expansion.sampling)
            .build()
            .map_err(|e| BuilderError::incomplete("expansion request", e))?;
        let result = self
            .stages
            .text
            .generate_text(&request)
            .await
            .and_then(|generated| expansion.accept(&generated));
        let prompt = require(stage, result)?;
        debug!(%stage, prompt_len = prompt.len(), "Prompt expanded");
        Ok(prompt)
    }

    /// Render an image for a scene 1 stage.
    async fn render(
        &self,
        stage: Stage,
        expansion: &Expansion,
        prompt: String,
        references: Vec<ArtifactReference>,
    ) -> ReelResult<ArtifactReference> {
        let request = ImageRequest::builder()
            .prompt(prompt)
            .references(references)
            .aspect_ratio(expansion.aspect_ratio)
            .build()
            .map_err(|e| BuilderError::incomplete("image request", e))?;
        require(stage, self.stages.image.generate_image(&request).await)
    }

    /// Establish continuity for scenes 2 onward, then shoot the scene.
    async fn continue_scene(
        &self,
        mut state: PipelineState,
        scene: &SceneDescriptor,
        sound_tag: &str,
    ) -> ReelResult<PipelineState> {
        match state.take_pending_video() {
            Some(previous) => {
                match Stage::FrameExtraction.resolve(self.stages.frames.extract_frame(&previous).await) {
                    StageOutcome::Ready(frame) => {
                        debug!(scene = scene.index, frame = %frame, "Reference advanced");
                        state.advance_reference(frame);
                    }
                    StageOutcome::Fatal(failure) => return Err(failure.into_run_error()),
                    StageOutcome::Skip(failure) | StageOutcome::Degrade(failure) => {
                        state.skip(scene.index, failure);
                        return Ok(state);
                    }
                }
            }
            None => debug!(
                scene = scene.index,
                reference = %state.reference_image(),
                "Previous scene produced no video, keeping reference"
            ),
        }
        self.shoot(state, scene, sound_tag).await
    }

    /// Generate a scene's video and overlay its sound.
    async fn shoot(
        &self,
        mut state: PipelineState,
        scene: &SceneDescriptor,
        sound_tag: &str,
    ) -> ReelResult<PipelineState> {
        let generated = self
            .stages
            .video
            .generate_video(&scene.description, state.reference_image())
            .await;
        let video = match Stage::VideoGeneration.resolve(generated) {
            StageOutcome::Ready(video) => video,
            StageOutcome::Fatal(failure) => return Err(failure.into_run_error()),
            StageOutcome::Skip(failure) | StageOutcome::Degrade(failure) => {
                state.skip(scene.index, failure);
                return Ok(state);
            }
        };
        debug!(scene = scene.index, video = %video, "Video generated");
        state.set_pending_video(video.clone());

        let overlaid = self.stages.sound.overlay_sound(&video, sound_tag).await;
        let segment = match Stage::SoundOverlay.resolve(overlaid) {
            StageOutcome::Ready(overlaid) => Segment::overlaid(scene.index, overlaid),
            StageOutcome::Degrade(failure) => {
                let reason = state.degrade(scene.index, &failure);
                Segment::silent(scene.index, video, reason)
            }
            StageOutcome::Skip(failure) => {
                state.skip(scene.index, failure);
                return Ok(state);
            }
            StageOutcome::Fatal(failure) => return Err(failure.into_run_error()),
        };
        info!(scene = scene.index, video = %segment.video(), "Segment ready");
        state.push_segment(segment);
        Ok(state)
    }

    async fn assemble(&self, state: PipelineState) -> ReelResult<PipelineRun> {
        let (segments, notes) = state.into_parts();
        if segments.len() < 2 {
            error!(produced = segments.len(), "Too few segments to merge");
            return Err(PipelineError::new(PipelineErrorKind::InsufficientSegments {
                produced: segments.len(),
            })
            .into());
        }

        match self.assembler.merge(&segments).await {
            Ok(reel) => {
                info!(reel = %reel, segments = segments.len(), skipped_or_degraded = notes.len(), "Reel merged");
                Ok(PipelineRun::merged(reel, segments, notes))
            }
            Err(e) => {
                let reason = format!("{} failed: {}", Stage::Merge, e);
                warn!(%reason, segments = segments.len(), "Returning individual segments");
                Ok(PipelineRun::partial(reason, segments, notes))
            }
        }
    }
}

/// Scene 1 stages have no fallback: any failure aborts the run.
fn require<T>(stage: Stage, result: ReelResult<T>) -> ReelResult<T> {
    match stage.resolve(result) {
        StageOutcome::Ready(value) => Ok(value),
        StageOutcome::Fatal(failure)
        | StageOutcome::Skip(failure)
        | StageOutcome::Degrade(failure) => {
            error!(stage = %failure.stage(), error = %failure.error(), "Run aborted");
            Err(failure.into_run_error())
        }
    }
}
