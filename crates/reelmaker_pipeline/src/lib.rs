//! Scene pipeline orchestration for Reelmaker.
//!
//! [`SceneOrchestrator::run`] turns a [`StoryboardPlan`](reelmaker_core::StoryboardPlan)
//! into one video segment per surviving scene and merges them into a reel.
//!
//! Failures are classified per [`Stage`]:
//!
//! | Stage | Class | Effect |
//! |---|---|---|
//! | character, setting, scene 1 composite | fatal | run aborts |
//! | frame extraction, video generation | skip | scene dropped, reference unchanged |
//! | sound overlay | degrade | raw video kept |
//! | merge | degrade | individual segments returned |
//!
//! Fewer than two segments at merge time is always fatal.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembly;
mod orchestrator;
mod prompts;
mod report;
mod stage;
mod state;

pub use assembly::{DEFAULT_DOWNLOAD_TIMEOUT, MergeAssembler};
pub use orchestrator::{SceneOrchestrator, StageSet, StageSetBuilder};
pub use prompts::{
    CHARACTER_TEMPLATE, COMBINE_TEMPLATE, Expansion, ExpansionSet, SETTING_TEMPLATE, character_prompt,
    combine_prompt, setting_prompt,
};
pub use report::{NoteKind, PipelineRun, RunStatus, SceneNote, Segment, SoundStatus};
pub use stage::{FailureClass, Stage, StageFailure, StageOutcome};
pub use state::PipelineState;
