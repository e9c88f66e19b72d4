//! Prompt-expansion templates for the scene 1 stages.

use reelmaker_core::{AspectRatio, Character, SamplingParams};
use reelmaker_error::{ModelError, ReelResult};
use reelmaker_storyboard::strip_code_fence;

/// Template turning a character into a character-sheet prompt.
pub const CHARACTER_TEMPLATE: &str = include_str!("../prompts/character.txt");
/// Template turning the scene 1 setting into a setting prompt.
pub const SETTING_TEMPLATE: &str = include_str!("../prompts/setting.txt");
/// Template describing how the character is placed into the setting.
pub const COMBINE_TEMPLATE: &str = include_str!("../prompts/combine.txt");

/// One prompt-expansion step: its sampling and output constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expansion {
    /// Sampling used for the text call
    pub sampling: SamplingParams,
    /// Shortest acceptable expanded prompt, in characters
    pub min_chars: usize,
    /// Framing of the image rendered from the prompt
    pub aspect_ratio: AspectRatio,
}

impl Expansion {
    /// Character-sheet expansion.
    pub fn character() -> Self {
        Self {
            sampling: SamplingParams::new(0.8, 0.95, 2000),
            min_chars: 50,
            aspect_ratio: AspectRatio::Square,
        }
    }

    /// Setting expansion.
    pub fn setting() -> Self {
        Self {
            sampling: SamplingParams::new(0.8, 0.95, 2000),
            min_chars: 50,
            aspect_ratio: AspectRatio::Widescreen,
        }
    }

    /// Scene 1 combination.
    pub fn combine() -> Self {
        Self {
            sampling: SamplingParams::new(0.7, 0.95, 1500),
            min_chars: 30,
            aspect_ratio: AspectRatio::Widescreen,
        }
    }

    /// Replace the sampling parameters.
    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    /// Clean a generated prompt and enforce the minimum length.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] when the cleaned prompt is shorter than
    /// `min_chars`.
    pub fn accept(&self, generated: &str) -> ReelResult<String> {
        let cleaned = strip_code_fence(generated);
        if cleaned.chars().count() < self.min_chars {
            return Err(ModelError::new("generated prompt is too short").into());
        }
        Ok(cleaned.to_string())
    }
}

/// The three scene 1 expansions used by a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpansionSet {
    /// Character sheet
    pub character: Expansion,
    /// Scene 1 setting
    pub setting: Expansion,
    /// Scene 1 composition
    pub combine: Expansion,
}

impl Default for ExpansionSet {
    fn default() -> Self {
        Self {
            character: Expansion::character(),
            setting: Expansion::setting(),
            combine: Expansion::combine(),
        }
    }
}

/// Render the character prompt request.
pub fn character_prompt(character: &Character) -> String {
    CHARACTER_TEMPLATE
        .replace("{name}", &character.name)
        .replace("{description}", &character.description)
}

/// Render the setting prompt request.
pub fn setting_prompt(setting: &str) -> String {
    SETTING_TEMPLATE.replace("{setting}", setting)
}

/// Render the combination prompt request for a scene description.
pub fn combine_prompt(description: &str) -> String {
    COMBINE_TEMPLATE.replace("{description}", description)
}
