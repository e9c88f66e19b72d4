//! Sampling parameters for text generation.

use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Sampling controls passed with every text-generation request.
///
/// # Examples
///
/// ```
/// use reelmaker_core::SamplingParams;
///
/// let params = SamplingParams::default()
///     .with_temperature(0.8)
///     .with_max_output_tokens(2000);
/// assert_eq!(*params.temperature(), 0.8);
/// assert_eq!(*params.top_p(), 0.95);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct SamplingParams {
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    temperature: f32,
    /// Nucleus sampling cutoff
    #[serde(default = "default_top_p")]
    top_p: f32,
    /// Output token budget
    #[serde(default = "default_max_output_tokens")]
    max_output_tokens: u32,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.95
}

fn default_max_output_tokens() -> u32 {
    2000
}

impl SamplingParams {
    /// Create sampling parameters.
    pub fn new(temperature: f32, top_p: f32, max_output_tokens: u32) -> Self {
        Self {
            temperature,
            top_p,
            max_output_tokens,
        }
    }
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self::new(default_temperature(), default_top_p(), default_max_output_tokens())
    }
}
