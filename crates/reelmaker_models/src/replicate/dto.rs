//! Replicate prediction wire types and output decoding.

use reelmaker_core::ArtifactReference;
use reelmaker_error::{ModelError, ReelError, ReelResult};
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};

/// Lifecycle state of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PredictionStatus {
    /// Queued, not yet running
    Starting,
    /// Running
    Processing,
    /// Finished with output
    Succeeded,
    /// Finished with an error
    Failed,
    /// Canceled before finishing
    Canceled,
}

impl PredictionStatus {
    /// Whether the prediction will not change any more.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PredictionStatus::Succeeded | PredictionStatus::Failed | PredictionStatus::Canceled
        )
    }
}

/// Links returned with a prediction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PredictionUrls {
    /// Status endpoint
    #[serde(default)]
    pub get: Option<String>,
    /// Cancel endpoint
    #[serde(default)]
    pub cancel: Option<String>,
}

/// A prediction as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Prediction id
    pub id: String,
    /// Current state
    pub status: PredictionStatus,
    /// Model output, present once succeeded
    #[serde(default)]
    pub output: Option<JsonValue>,
    /// Failure message
    #[serde(default)]
    pub error: Option<JsonValue>,
    /// Follow-up links
    #[serde(default)]
    pub urls: PredictionUrls,
}

impl Prediction {
    /// Error text reported by the API, if any.
    pub fn error_message(&self) -> String {
        match &self.error {
            Some(JsonValue::String(message)) => message.clone(),
            Some(JsonValue::Null) | None => "no error message".to_string(),
            Some(other) => other.to_string(),
        }
    }
}

/// Where to create a prediction and what to send.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    /// Endpoint URL
    pub url: String,
    /// JSON body
    pub body: JsonValue,
}

impl PredictionRequest {
    /// Build the creation request for `model`.
    ///
    /// `owner/name` identifiers use the model endpoint. `owner/name:version`
    /// identifiers use the generic endpoint with an explicit version.
    pub fn new(base_url: &str, model: &str, input: JsonValue) -> Self {
        match model.split_once(':') {
            Some((_, version)) => Self {
                url: format!("{}/predictions", base_url),
                body: json!({ "version": version, "input": input }),
            },
            None => Self {
                url: format!("{}/models/{}/predictions", base_url, model),
                body: json!({ "input": input }),
            },
        }
    }
}

/// Decode text output: a string, or a list of streamed string chunks.
pub fn decode_text(output: &JsonValue) -> ReelResult<String> {
    let text = match output {
        JsonValue::String(text) => text.clone(),
        JsonValue::Array(chunks) => chunks.iter().filter_map(JsonValue::as_str).collect(),
        other => {
            return Err(ModelError::new(format!("unexpected text output: {}", other)).into());
        }
    };
    if text.trim().is_empty() {
        return Err(ModelError::new("model returned empty text").into());
    }
    Ok(text)
}

/// Decode an artifact locator: a string, or the first string of a list.
pub fn decode_artifact(output: &JsonValue) -> ReelResult<ArtifactReference> {
    let locator = match output {
        JsonValue::String(locator) => Some(locator.as_str()),
        JsonValue::Array(items) => items.first().and_then(JsonValue::as_str),
        _ => None,
    };
    match locator {
        Some(locator) => ArtifactReference::parse(locator)
            .map_err(|e| ReelError::from(ModelError::new(format!("invalid artifact locator: {}", e)))),
        None => Err(ModelError::new(format!("unexpected artifact output: {}", output)).into()),
    }
}

/// Decode an artifact that must be reachable over http(s).
pub fn decode_remote_artifact(output: &JsonValue) -> ReelResult<ArtifactReference> {
    let artifact = decode_artifact(output)?;
    if !artifact.is_remote() {
        return Err(ModelError::new(format!("expected an http(s) URL, got {}", artifact)).into());
    }
    Ok(artifact)
}
