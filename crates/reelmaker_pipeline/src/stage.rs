//! Stage taxonomy and per-stage failure classification.
//!
//! Every external call the orchestrator makes belongs to a [`Stage`], and
//! each stage has a fixed [`FailureClass`] deciding what a failure means for
//! the run. Resolving a stage result yields a [`StageOutcome`] the scene loop
//! pattern-matches on.

use reelmaker_error::{PipelineError, PipelineErrorKind, ReelError, ReelResult};
use serde::{Deserialize, Serialize};

/// External stage invoked by the orchestrator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    /// Expand the character into an image prompt
    CharacterPrompt,
    /// Render the character sheet
    CharacterImage,
    /// Expand the scene 1 setting into an image prompt
    SettingPrompt,
    /// Render the scene 1 setting
    SettingImage,
    /// Describe how character and setting are combined for scene 1
    CombinePrompt,
    /// Compose character and setting into the scene 1 reference image
    CombineImage,
    /// Pull a still from the previous scene's video
    FrameExtraction,
    /// Animate the reference image
    VideoGeneration,
    /// Add the ambient sound track
    SoundOverlay,
    /// Concatenate all segments
    Merge,
}

/// What a failure at a stage means for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailureClass {
    /// Abort the whole run
    Fatal,
    /// Drop the current scene and continue
    Skip,
    /// Keep going with a degraded output
    Degrade,
}

impl Stage {
    /// Failure class of this stage.
    pub fn failure_class(self) -> FailureClass {
        match self {
            Stage::CharacterPrompt
            | Stage::CharacterImage
            | Stage::SettingPrompt
            | Stage::SettingImage
            | Stage::CombinePrompt
            | Stage::CombineImage => FailureClass::Fatal,
            Stage::FrameExtraction | Stage::VideoGeneration => FailureClass::Skip,
            // A failed merge still hands back the individual segments
            Stage::SoundOverlay | Stage::Merge => FailureClass::Degrade,
        }
    }

    /// Tag a stage result with this stage's failure class.
    pub fn resolve<T>(self, result: ReelResult<T>) -> StageOutcome<T> {
        match result {
            Ok(value) => StageOutcome::Ready(value),
            Err(error) => {
                let failure = StageFailure { stage: self, error };
                match self.failure_class() {
                    FailureClass::Fatal => StageOutcome::Fatal(failure),
                    FailureClass::Skip => StageOutcome::Skip(failure),
                    FailureClass::Degrade => StageOutcome::Degrade(failure),
                }
            }
        }
    }
}

/// A failed stage call.
#[derive(Debug)]
pub struct StageFailure {
    stage: Stage,
    error: ReelError,
}

impl StageFailure {
    /// Stage that failed.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Underlying error.
    pub fn error(&self) -> &ReelError {
        &self.error
    }

    /// Human-readable reason including the stage name.
    pub fn reason(&self) -> String {
        format!("{} failed: {}", self.stage, self.error)
    }

    /// Convert a fatal failure into the run-level error.
    ///
    /// Character stages map to a bootstrap failure and every other stage to
    /// a scene 1 setup failure.
    #[track_caller]
    pub fn into_run_error(self) -> ReelError {
        let reason = self.reason();
        let kind = match self.stage {
            Stage::CharacterPrompt | Stage::CharacterImage => {
                PipelineErrorKind::CharacterBootstrap(reason)
            }
            _ => PipelineErrorKind::SceneSetup(reason),
        };
        PipelineError::new(kind).into()
    }
}

/// Result of one stage call, tagged with its failure class.
#[derive(Debug)]
pub enum StageOutcome<T> {
    /// The stage produced its output
    Ready(T),
    /// The run cannot continue
    Fatal(StageFailure),
    /// The current scene is dropped
    Skip(StageFailure),
    /// The scene continues with a fallback
    Degrade(StageFailure),
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelmaker_error::ModelError;
    use strum::IntoEnumIterator;

    #[test]
    fn test_scene_one_stages_are_fatal() {
        let fatal: Vec<Stage> = Stage::iter()
            .filter(|stage| stage.failure_class() == FailureClass::Fatal)
            .collect();
        assert_eq!(
            fatal,
            vec![
                Stage::CharacterPrompt,
                Stage::CharacterImage,
                Stage::SettingPrompt,
                Stage::SettingImage,
                Stage::CombinePrompt,
                Stage::CombineImage,
            ]
        );
    }

    #[test]
    fn test_resolve_tags_failures_by_stage() {
        let skipped = Stage::VideoGeneration.resolve::<()>(Err(ModelError::new("empty").into()));
        assert!(matches!(skipped, StageOutcome::Skip(_)));

        let degraded = Stage::SoundOverlay.resolve::<()>(Err(ModelError::new("empty").into()));
        assert!(matches!(degraded, StageOutcome::Degrade(_)));

        let ready = Stage::FrameExtraction.resolve(Ok(5));
        assert!(matches!(ready, StageOutcome::Ready(5)));
    }

    #[test]
    fn test_character_failure_becomes_bootstrap_error() {
        let StageOutcome::Fatal(failure) =
            Stage::CharacterImage.resolve::<()>(Err(ModelError::new("no image").into()))
        else {
            panic!("character image failures are fatal");
        };
        let message = failure.into_run_error().to_string();
        assert!(message.contains("Character bootstrap failed"));
        assert!(message.contains("character_image failed"));
    }
}
