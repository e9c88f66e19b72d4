//! Storyboard instruction template.

use reelmaker_core::{SamplingParams, StoryIdea};

/// Instruction template sent to the text generator. `{idea}` is replaced
/// with the user's idea.
pub const STORYBOARD_TEMPLATE: &str = include_str!("../prompts/storyboard.txt");

/// Render the storyboard prompt for an idea.
pub fn storyboard_prompt(idea: &StoryIdea) -> String {
    STORYBOARD_TEMPLATE.replace("{idea}", idea.as_str())
}

/// Default sampling for storyboard generation.
///
/// The token budget is generous because twelve scenes of JSON are long, and a
/// tight budget is the main cause of truncated responses.
pub fn storyboard_sampling() -> SamplingParams {
    SamplingParams::new(0.7, 0.95, 8000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_idea() {
        let prompt = storyboard_prompt(&StoryIdea::new("A robot waters a garden"));
        assert!(prompt.contains("\"A robot waters a garden\""));
        assert!(!prompt.contains("{idea}"));
        assert!(prompt.contains("exactly 12 scenes"));
    }
}
