//! The storyboard interpreter.

use crate::{
    document::validate_document,
    extraction::{quote_count, repair, strip_code_fence},
    template::{storyboard_prompt, storyboard_sampling},
};
use derive_getters::Getters;
use reelmaker_core::{SamplingParams, StoryIdea, StoryboardPlan, TextRequest};
use reelmaker_error::{BuilderError, ReelResult, StoryboardError, StoryboardErrorKind};
use reelmaker_interface::TextGenerator;
use serde_json::Value as JsonValue;
use tracing::{error, info, instrument, warn};

/// How the storyboard document was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Recovery {
    /// The response parsed as-is
    #[strum(serialize = "clean")]
    Clean,
    /// A truncated trailing fragment had to be removed first
    #[strum(serialize = "recovered")]
    Recovered,
}

/// A successfully interpreted storyboard.
///
/// Clean and recovered interpretations carry identical plan data; only the
/// [`Recovery`] tag and message differ.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Interpretation {
    /// The validated plan
    plan: StoryboardPlan,
    /// Whether repair was needed
    recovery: Recovery,
}

impl Interpretation {
    /// Human-readable outcome message.
    pub fn message(&self) -> &'static str {
        match self.recovery {
            Recovery::Clean => "Storyboard created successfully",
            Recovery::Recovered => "Storyboard created successfully (truncated content cleaned)",
        }
    }

    /// Take ownership of the plan.
    pub fn into_plan(self) -> StoryboardPlan {
        self.plan
    }
}

/// Converts story ideas into storyboard plans.
///
/// The interpreter makes exactly one generation call per [`interpret`]
/// invocation. Retrying is left to the caller.
///
/// [`interpret`]: StoryboardInterpreter::interpret
pub struct StoryboardInterpreter<G: TextGenerator> {
    generator: G,
    sampling: SamplingParams,
}

impl<G: TextGenerator> StoryboardInterpreter<G> {
    /// Create an interpreter with the default storyboard sampling.
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            sampling: storyboard_sampling(),
        }
    }

    /// Override the sampling parameters.
    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    /// Interpret an idea into a twelve-scene plan.
    ///
    /// # Errors
    ///
    /// Returns a [`StoryboardError`] if:
    /// - The generation call fails
    /// - The response has an odd number of quote characters (truncated)
    /// - The response is not valid JSON and cannot be repaired
    /// - The document is missing a required key or does not have 12 scenes
    #[instrument(skip(self, idea), fields(model = self.generator.model_name(), idea_len = idea.as_str().len()))]
    pub async fn interpret(&self, idea: &StoryIdea) -> ReelResult<Interpretation> {
        let request = TextRequest::builder()
            .prompt(storyboard_prompt(idea))
            .sampling(self.sampling)
            .build()
            .map_err(|e| BuilderError::incomplete("storyboard request", e))?;

        let generated = self.generator.generate_text(&request).await.map_err(|e| {
            error!(error = %e, "Storyboard generation call failed");
            StoryboardError::new(StoryboardErrorKind::GenerationFailed(e.to_string()))
        })?;

        let content = strip_code_fence(&generated);

        let quotes = quote_count(content);
        if quotes % 2 != 0 {
            warn!(quotes, length = content.len(), "Storyboard response is truncated");
            return Err(StoryboardError::new(StoryboardErrorKind::Truncated {
                quotes,
                raw: content.to_string(),
            })
            .into());
        }

        let (document, recovery) = parse_with_recovery(content)?;
        let plan = validate_document(document, content).inspect_err(|e| {
            error!(error = %e, %recovery, "Storyboard failed validation");
        })?;

        info!(
            %recovery,
            character = %plan.character().name,
            sound_tag = %plan.sound_tag(),
            "Storyboard interpreted"
        );

        Ok(Interpretation { plan, recovery })
    }
}

/// Parse the cleaned content, falling back to a single repair attempt.
fn parse_with_recovery(content: &str) -> ReelResult<(JsonValue, Recovery)> {
    let first_error = match serde_json::from_str(content) {
        Ok(document) => return Ok((document, Recovery::Clean)),
        Err(e) => e,
    };

    if let Some(repaired) = repair(content) {
        match serde_json::from_str(&repaired) {
            Ok(document) => {
                warn!(
                    original_len = content.len(),
                    repaired_len = repaired.len(),
                    "Recovered truncated storyboard"
                );
                return Ok((document, Recovery::Recovered));
            }
            Err(e) => warn!(error = %e, "Repaired storyboard still does not parse"),
        }
    }

    error!(error = %first_error, "Storyboard JSON parsing failed");
    Err(StoryboardError::new(StoryboardErrorKind::ParseFailed {
        message: first_error.to_string(),
        raw: content.to_string(),
    })
    .into())
}
