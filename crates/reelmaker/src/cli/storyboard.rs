//! Storyboard command handler.

use super::DEFAULT_IDEA;
use reelmaker::{JsonError, ReelResult, StorageError, StorageErrorKind, StoryIdea, Studio};
use std::path::Path;

/// Interpret an idea and print the plan.
pub async fn run_storyboard(
    studio: &Studio,
    idea: Option<String>,
    out: Option<&Path>,
) -> ReelResult<()> {
    let idea = StoryIdea::new(idea.unwrap_or_else(|| DEFAULT_IDEA.to_string()));
    let interpretation = studio.storyboard(&idea).await?;

    let json = serde_json::to_string_pretty(interpretation.plan())
        .map_err(|e| JsonError::new(e.to_string()))?;

    if let Some(out) = out {
        tokio::fs::write(out, &json).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                out.display(),
                e
            )))
        })?;
        println!("Plan written to {}", out.display());
    } else {
        println!("{}", json);
    }

    println!("{} [{}]", interpretation.message(), interpretation.recovery());
    Ok(())
}
