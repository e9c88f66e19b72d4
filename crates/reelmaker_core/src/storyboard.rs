//! The interpreted storyboard plan.

use derive_getters::Getters;
use reelmaker_error::{ReelError, ReelResult, ValidationError};
use serde::{Deserialize, Serialize};

/// Number of scenes in every storyboard.
pub const SCENE_COUNT: usize = 12;

/// The single character who appears in every scene.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Character {
    /// Character's name
    pub name: String,
    /// Appearance and background description
    pub description: String,
}

impl Character {
    /// Create a character.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// One narrative beat of roughly five seconds.
///
/// Only the first scene carries a setting; later scenes take their visual
/// starting point from the previous scene's footage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneDescriptor {
    /// 1-based position in the storyboard
    pub index: usize,
    /// Location and atmosphere, meaningful for scene 1 only
    #[serde(default)]
    pub setting: String,
    /// Short declarative action sentences
    pub description: String,
}

impl SceneDescriptor {
    /// Create a scene descriptor.
    pub fn new(index: usize, setting: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            index,
            setting: setting.into(),
            description: description.into(),
        }
    }

    /// Whether the scene carries a non-blank setting.
    pub fn has_setting(&self) -> bool {
        !self.setting.trim().is_empty()
    }
}

/// A structured plan: one character, one ambient sound tag, twelve scenes.
///
/// Scenes are held in narrative order and numbered `1..=12`. The plan can
/// only be constructed through [`StoryboardPlan::new`] (or deserialization,
/// which goes through the same checks), so every plan in circulation
/// satisfies the scene-count invariant.
///
/// # Examples
///
/// ```
/// use reelmaker_core::{Character, SceneDescriptor, StoryboardPlan, SCENE_COUNT};
///
/// let scenes = (1..=SCENE_COUNT)
///     .map(|i| SceneDescriptor::new(i, if i == 1 { "A rainy attic" } else { "" }, "The person sits."))
///     .collect();
/// let plan = StoryboardPlan::new(Character::new("Mira", "A painter in her thirties"), "rain", scenes).unwrap();
/// assert_eq!(plan.scenes().len(), 12);
/// assert_eq!(plan.sound_tag(), "rain");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(try_from = "PlanRecord")]
pub struct StoryboardPlan {
    /// The single recurring character
    character: Character,
    /// Ambient sound tag reused for every scene
    sound_tag: String,
    /// Scenes in narrative order
    scenes: Vec<SceneDescriptor>,
}

impl StoryboardPlan {
    /// Assemble a plan, checking structural invariants.
    ///
    /// # Errors
    ///
    /// Returns a validation error if there are not exactly [`SCENE_COUNT`]
    /// scenes or the scene indices are not `1..=SCENE_COUNT` in order.
    pub fn new(
        character: Character,
        sound_tag: impl Into<String>,
        scenes: Vec<SceneDescriptor>,
    ) -> ReelResult<Self> {
        if scenes.len() != SCENE_COUNT {
            return Err(ValidationError::new(format!(
                "expected {} scenes, got {}",
                SCENE_COUNT,
                scenes.len()
            ))
            .into());
        }
        if let Some(scene) = scenes
            .iter()
            .enumerate()
            .find(|(position, scene)| scene.index != position + 1)
            .map(|(_, scene)| scene)
        {
            return Err(ValidationError::new(format!(
                "scene index {} is out of order",
                scene.index
            ))
            .into());
        }

        Ok(Self {
            character,
            sound_tag: sound_tag.into(),
            scenes,
        })
    }

    /// The first scene, which carries the setting.
    pub fn opening_scene(&self) -> &SceneDescriptor {
        // Construction guarantees SCENE_COUNT > 0 scenes
        &self.scenes[0]
    }
}

#[derive(Deserialize)]
struct PlanRecord {
    character: Character,
    sound_tag: String,
    scenes: Vec<SceneDescriptor>,
}

impl TryFrom<PlanRecord> for StoryboardPlan {
    type Error = ReelError;

    fn try_from(record: PlanRecord) -> ReelResult<Self> {
        Self::new(record.character, record.sound_tag, record.scenes)
    }
}
