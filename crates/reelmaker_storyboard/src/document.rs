//! Structural validation of a parsed storyboard document.

use reelmaker_core::{Character, SCENE_COUNT, SceneDescriptor, StoryboardPlan};
use reelmaker_error::{ReelResult, StoryboardError, StoryboardErrorKind};
use serde::Deserialize;
use serde_json::Value as JsonValue;

const CHARACTERS_KEY: &str = "characters";
const SCENES_KEY: &str = "scenes";
const SOUND_KEY: &str = "sound_effect";

#[derive(Deserialize)]
struct SceneRecord {
    #[serde(default)]
    setting: Option<String>,
    description: String,
}

/// Validate a parsed storyboard document and convert it into a plan.
///
/// The document must be an object holding `characters`, `scenes` and
/// `sound_effect`, with exactly [`SCENE_COUNT`] scenes. Scenes keep document
/// order and are numbered by position; any `scene_number` field in the
/// document is ignored. When several characters are listed the first one is
/// used.
///
/// `raw` is the text the document was parsed from and is attached to every
/// failure.
///
/// # Errors
///
/// Returns a [`StoryboardError`] naming the broken invariant. The scene list
/// is never padded or trimmed to fit.
pub fn validate_document(document: JsonValue, raw: &str) -> ReelResult<StoryboardPlan> {
    let JsonValue::Object(mut root) = document else {
        return Err(invalid_shape("storyboard document is not a JSON object", raw));
    };

    for key in [CHARACTERS_KEY, SCENES_KEY, SOUND_KEY] {
        if !root.contains_key(key) {
            return Err(StoryboardError::new(StoryboardErrorKind::MissingKey {
                key: key.to_string(),
                raw: raw.to_string(),
            })
            .into());
        }
    }

    let scenes = match root.remove(SCENES_KEY) {
        Some(JsonValue::Array(scenes)) => scenes,
        _ => return Err(invalid_shape("'scenes' is not a list", raw)),
    };
    if scenes.len() != SCENE_COUNT {
        return Err(StoryboardError::new(StoryboardErrorKind::SceneCount {
            expected: SCENE_COUNT,
            actual: scenes.len(),
            raw: raw.to_string(),
        })
        .into());
    }

    let characters: Vec<Character> = root
        .remove(CHARACTERS_KEY)
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| invalid_shape(&format!("malformed character list: {}", e), raw))?
        .unwrap_or_default();
    let character_count = characters.len();
    let Some(character) = characters.into_iter().next() else {
        return Err(invalid_shape("storyboard has no character", raw));
    };
    if character_count > 1 {
        tracing::warn!(
            character_count,
            chosen = %character.name,
            "Storyboard lists several characters, using the first"
        );
    }

    let sound_tag = match root.remove(SOUND_KEY) {
        Some(JsonValue::String(tag)) => tag.trim().to_string(),
        _ => return Err(invalid_shape("'sound_effect' is not a string", raw)),
    };

    let scenes = scenes
        .into_iter()
        .enumerate()
        .map(|(position, scene)| {
            let index = position + 1;
            serde_json::from_value::<SceneRecord>(scene)
                .map(|record| {
                    SceneDescriptor::new(
                        index,
                        record.setting.unwrap_or_default(),
                        record.description,
                    )
                })
                .map_err(|e| invalid_shape(&format!("scene {} is malformed: {}", index, e), raw))
        })
        .collect::<ReelResult<Vec<_>>>()?;

    StoryboardPlan::new(character, sound_tag, scenes)
}

#[track_caller]
fn invalid_shape(message: &str, raw: &str) -> reelmaker_error::ReelError {
    StoryboardError::new(StoryboardErrorKind::InvalidShape {
        message: message.to_string(),
        raw: raw.to_string(),
    })
    .into()
}
