//! Run results returned by the orchestrator.

use crate::Stage;
use derive_getters::Getters;
use reelmaker_core::ArtifactReference;
use serde::{Deserialize, Serialize};

/// Whether a segment carries the ambient sound track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SoundStatus {
    /// Sound overlay succeeded
    Overlaid,
    /// Sound overlay failed and the raw video was kept
    Silent {
        /// Why the overlay failed
        reason: String,
    },
}

/// One produced video segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Segment {
    /// Scene the segment belongs to (1-based)
    scene: usize,
    /// The segment's video
    video: ArtifactReference,
    /// Sound overlay outcome
    sound: SoundStatus,
}

impl Segment {
    /// Segment with the ambient sound applied.
    pub fn overlaid(scene: usize, video: ArtifactReference) -> Self {
        Self {
            scene,
            video,
            sound: SoundStatus::Overlaid,
        }
    }

    /// Segment that fell back to the raw video.
    pub fn silent(scene: usize, video: ArtifactReference, reason: impl Into<String>) -> Self {
        Self {
            scene,
            video,
            sound: SoundStatus::Silent {
                reason: reason.into(),
            },
        }
    }
}

/// How a scene departed from the happy path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NoteKind {
    /// The scene produced no segment
    Skipped,
    /// The scene produced a segment without sound
    Degraded,
}

/// Diagnostic entry for a skipped or degraded scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SceneNote {
    /// Scene number
    scene: usize,
    /// Stage that failed
    stage: Stage,
    /// Skip or degrade
    kind: NoteKind,
    /// Failure reason
    reason: String,
}

impl SceneNote {
    /// Create a note.
    pub fn new(scene: usize, stage: Stage, kind: NoteKind, reason: impl Into<String>) -> Self {
        Self {
            scene,
            stage,
            kind,
            reason: reason.into(),
        }
    }
}

/// Terminal status of a run that did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunStatus {
    /// All segments were merged into one artifact
    Merged,
    /// Merging failed; the individual segments are the result
    PartialMerge {
        /// Why the merge failed
        reason: String,
    },
}

/// Result of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PipelineRun {
    /// Merged or partial
    status: RunStatus,
    /// The merged reel, present only when merged
    final_artifact: Option<ArtifactReference>,
    /// Segments in scene order
    segments: Vec<Segment>,
    /// Skipped and degraded scenes
    notes: Vec<SceneNote>,
}

impl PipelineRun {
    /// A run whose segments were merged.
    pub fn merged(
        final_artifact: ArtifactReference,
        segments: Vec<Segment>,
        notes: Vec<SceneNote>,
    ) -> Self {
        Self {
            status: RunStatus::Merged,
            final_artifact: Some(final_artifact),
            segments,
            notes,
        }
    }

    /// A run whose merge failed after segments were produced.
    pub fn partial(reason: impl Into<String>, segments: Vec<Segment>, notes: Vec<SceneNote>) -> Self {
        Self {
            status: RunStatus::PartialMerge {
                reason: reason.into(),
            },
            final_artifact: None,
            segments,
            notes,
        }
    }

    /// Number of produced segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Whether a single merged artifact exists.
    pub fn is_merged(&self) -> bool {
        matches!(self.status, RunStatus::Merged)
    }
}
