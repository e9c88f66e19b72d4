//! Per-run state carried through the scene fold.

use crate::{NoteKind, SceneNote, Segment, StageFailure};
use reelmaker_core::ArtifactReference;
use tracing::warn;

/// State owned by one run.
///
/// `reference_image` always points at the last successfully established
/// frame: the scene 1 composite or the latest extracted still. It is never
/// advanced by a skipped scene.
#[derive(Debug, Clone)]
pub struct PipelineState {
    reference_image: ArtifactReference,
    pending_video: Option<ArtifactReference>,
    segments: Vec<Segment>,
    notes: Vec<SceneNote>,
}

impl PipelineState {
    /// Start a run from the scene 1 reference image.
    pub fn new(reference_image: ArtifactReference) -> Self {
        Self {
            reference_image,
            pending_video: None,
            segments: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Reference image for the next video generation.
    pub fn reference_image(&self) -> &ArtifactReference {
        &self.reference_image
    }

    /// Produced segments, in scene order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Recorded notes.
    pub fn notes(&self) -> &[SceneNote] {
        &self.notes
    }

    /// Take the previous scene's raw video, if that scene produced one.
    pub fn take_pending_video(&mut self) -> Option<ArtifactReference> {
        self.pending_video.take()
    }

    /// Move the reference to a newly extracted frame.
    pub fn advance_reference(&mut self, frame: ArtifactReference) {
        self.reference_image = frame;
    }

    /// Record a scene's raw video for the next scene's continuity step.
    pub fn set_pending_video(&mut self, video: ArtifactReference) {
        self.pending_video = Some(video);
    }

    /// Append a finished segment.
    pub fn push_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Drop a scene, leaving the reference image where it was.
    pub fn skip(&mut self, scene: usize, failure: StageFailure) {
        let reason = failure.reason();
        warn!(scene, stage = %failure.stage(), %reason, "Scene skipped");
        self.notes
            .push(SceneNote::new(scene, failure.stage(), NoteKind::Skipped, reason));
    }

    /// Record a degraded scene.
    pub fn degrade(&mut self, scene: usize, failure: &StageFailure) -> String {
        let reason = failure.reason();
        warn!(scene, stage = %failure.stage(), %reason, "Scene degraded");
        self.notes.push(SceneNote::new(
            scene,
            failure.stage(),
            NoteKind::Degraded,
            reason.clone(),
        ));
        reason
    }

    /// Split into segments and notes.
    pub fn into_parts(self) -> (Vec<Segment>, Vec<SceneNote>) {
        (self.segments, self.notes)
    }
}
