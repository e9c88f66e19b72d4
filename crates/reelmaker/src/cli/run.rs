//! Pipeline command handler.

use super::DEFAULT_IDEA;
use reelmaker::{ReelResult, RunStatus, SCENE_COUNT, SoundStatus, StoryIdea, Studio, load_plan};
use std::path::Path;
use tracing::info;

/// Produce a reel from an idea or a saved plan.
pub async fn run_pipeline(
    studio: &Studio,
    idea: Option<String>,
    plan: Option<&Path>,
) -> ReelResult<()> {
    let plan = match plan {
        Some(path) => load_plan(path).await?,
        None => {
            let idea = StoryIdea::new(idea.unwrap_or_else(|| DEFAULT_IDEA.to_string()));
            let interpretation = studio.storyboard(&idea).await?;
            info!(recovery = %interpretation.recovery(), "{}", interpretation.message());
            interpretation.into_plan()
        }
    };

    let run_id = uuid::Uuid::new_v4().to_string();
    let run = studio.produce(&plan, &run_id).await?;

    match run.status() {
        RunStatus::Merged => {
            if let Some(artifact) = run.final_artifact() {
                println!("Reel: {}", artifact);
            }
        }
        RunStatus::PartialMerge { reason } => {
            println!("Merge did not complete: {}", reason);
            for segment in run.segments() {
                let sound = match segment.sound() {
                    SoundStatus::Overlaid => "with sound".to_string(),
                    SoundStatus::Silent { reason } => format!("silent: {}", reason),
                };
                println!("  scene {:>2}: {} ({})", segment.scene(), segment.video(), sound);
            }
        }
    }

    println!("{} of {} scenes produced", run.segment_count(), SCENE_COUNT);
    for note in run.notes() {
        println!(
            "  scene {:>2} {} at {}: {}",
            note.scene(),
            note.kind(),
            note.stage(),
            note.reason()
        );
    }
    Ok(())
}
