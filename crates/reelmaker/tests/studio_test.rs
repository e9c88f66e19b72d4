//! Tests for configuration-driven wiring.

mod test_utils;

use reelmaker::{
    ReelResult, Recovery, RetryPolicy, RunStatus, StoryIdea, StoryboardInterpreter,
    TransportError, TransportErrorKind, interpret_with_retry, load_plan,
};
use std::sync::Arc;
use test_utils::{Backstage, ScriptedText, config, storyboard_json, studio};

fn idea() -> StoryIdea {
    StoryIdea::new("A lighthouse keeper befriends a gull")
}

#[tokio::test(start_paused = true)]
async fn storyboard_is_regenerated_after_truncation() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let full = storyboard_json();
    let truncated = full[..full.len() / 2].trim_end_matches('"').to_string() + "\"";
    let text = Arc::new(ScriptedText::scripted(vec![Ok(truncated), Ok(full)]));
    let studio = studio(config(dir.path()), text.clone(), Arc::new(Backstage::default()));

    let interpretation = studio.storyboard(&idea()).await?;

    assert_eq!(text.calls(), 2);
    assert_eq!(interpretation.plan().sound_tag(), "waves");
    assert_eq!(interpretation.plan().character().name, "Ansel");
    Ok(())
}

#[tokio::test]
async fn storyboard_uses_configured_sampling() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let text = Arc::new(ScriptedText::scripted(vec![Ok(storyboard_json())]));
    let studio = studio(config(dir.path()), text.clone(), Arc::new(Backstage::default()));

    studio.storyboard(&idea()).await?;

    let requests = text.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(*requests[0].sampling().max_output_tokens(), 8000);
    assert!(requests[0].prompt().contains("lighthouse keeper"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn storyboard_gives_up_after_max_attempts() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let text = Arc::new(ScriptedText::scripted(vec![
        Ok("no json here".to_string()),
        Ok("still no json".to_string()),
        Ok("nothing".to_string()),
        Ok(storyboard_json()),
    ]));
    let studio = studio(config(dir.path()), text.clone(), Arc::new(Backstage::default()));

    let err = studio.storyboard(&idea()).await.unwrap_err();

    assert_eq!(text.calls(), 3);
    assert!(err.raw_output().is_some());
    Ok(())
}

#[tokio::test]
async fn disabled_policy_makes_one_attempt() {
    let failure: ReelResult<String> =
        Err(TransportError::new(TransportErrorKind::Timeout(30)).into());
    let text = Arc::new(ScriptedText::scripted(vec![failure, Ok(storyboard_json())]));
    let interpreter = StoryboardInterpreter::new(text.clone());

    let result = interpret_with_retry(&interpreter, &RetryPolicy::disabled(), &idea()).await;

    assert!(result.is_err());
    assert_eq!(text.calls(), 1);
}

#[tokio::test]
async fn clean_interpretation_is_not_marked_recovered() -> anyhow::Result<()> {
    let text = Arc::new(ScriptedText::scripted(vec![Ok(storyboard_json())]));
    let interpreter = StoryboardInterpreter::new(text);

    let interpretation =
        interpret_with_retry(&interpreter, &RetryPolicy::default(), &idea()).await?;

    assert_eq!(*interpretation.recovery(), Recovery::Clean);
    Ok(())
}

#[tokio::test]
async fn produce_writes_reel_under_run_directory() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let text = Arc::new(ScriptedText::scripted(vec![Ok(storyboard_json())]));
    let backstage = Arc::new(Backstage::default());
    let studio = studio(config(dir.path()), text, backstage.clone());
    let plan = studio.storyboard(&idea()).await?.into_plan();

    let run = studio.produce(&plan, "run-1").await?;

    assert_eq!(*run.status(), RunStatus::Merged);
    assert_eq!(run.segment_count(), 12);
    assert_eq!(backstage.videos(), 12);
    let reel = studio.reel_path("run-1");
    assert_eq!(reel, dir.path().join("run-1").join("final_video.mp4"));
    let merged = std::fs::read_to_string(&reel)?;
    let first = merged.lines().next().unwrap_or_default();
    assert_eq!(first, "https://videos.test/scene-1.mp4?sound=1");
    assert_eq!(merged.lines().count(), 12);
    Ok(())
}

#[tokio::test]
async fn saved_plan_loads_back() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let text = Arc::new(ScriptedText::scripted(vec![Ok(storyboard_json())]));
    let studio = studio(config(dir.path()), text, Arc::new(Backstage::default()));
    let plan = studio.storyboard(&idea()).await?.into_plan();
    let path = dir.path().join("plan.json");
    std::fs::write(&path, serde_json::to_string_pretty(&plan)?)?;

    let loaded = load_plan(&path).await?;

    assert_eq!(loaded, plan);
    Ok(())
}

#[tokio::test]
async fn plan_file_with_wrong_scene_count_is_rejected() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let text = Arc::new(ScriptedText::scripted(vec![Ok(storyboard_json())]));
    let studio = studio(config(dir.path()), text, Arc::new(Backstage::default()));
    let plan = studio.storyboard(&idea()).await?.into_plan();
    let mut value = serde_json::to_value(&plan)?;
    value["scenes"].as_array_mut().unwrap().pop();
    let path = dir.path().join("short.json");
    std::fs::write(&path, value.to_string())?;

    assert!(load_plan(&path).await.is_err());
    assert!(load_plan(&dir.path().join("missing.json")).await.is_err());
    Ok(())
}
