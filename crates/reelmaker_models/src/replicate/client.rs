//! Replicate prediction client.

use crate::replicate::{Prediction, PredictionRequest, PredictionStatus, ReplicateSettings};
use reelmaker_error::{
    ConfigError, JsonError, ModelError, ReelResult, TransportError, TransportErrorKind,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value as JsonValue;
use std::time::{Duration, Instant};
use tracing::{debug, error, instrument, warn};

/// Environment variable holding the API token.
pub const REPLICATE_TOKEN_VAR: &str = "REPLICATE_API_TOKEN";

/// Client for running Replicate predictions.
///
/// Predictions are created with `Prefer: wait`, so short jobs usually come
/// back finished. Anything still running is polled until it reaches a
/// terminal state or the configured maximum wait elapses.
#[derive(Debug, Clone)]
pub struct ReplicateClient {
    http: Client,
    api_token: String,
    settings: ReplicateSettings,
}

impl ReplicateClient {
    /// Create a client, reading the token from `REPLICATE_API_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the token is not set.
    pub fn from_env(settings: ReplicateSettings) -> ReelResult<Self> {
        let api_token = std::env::var(REPLICATE_TOKEN_VAR)
            .map_err(|e| ConfigError::new(format!("{} not set: {}", REPLICATE_TOKEN_VAR, e)))?;
        Self::with_api_token(api_token, settings)
    }

    /// Create a client with an explicit token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is blank or the HTTP client cannot be
    /// built.
    #[instrument(skip(api_token, settings), fields(base_url = %settings.base_url()))]
    pub fn with_api_token(api_token: impl Into<String>, settings: ReplicateSettings) -> ReelResult<Self> {
        let api_token = api_token.into();
        if api_token.trim().is_empty() {
            return Err(ConfigError::new(format!("{} is empty", REPLICATE_TOKEN_VAR)).into());
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(*settings.request_timeout_secs()))
            .build()
            .map_err(|e| TransportError::new(TransportErrorKind::Request(e.to_string())))?;

        debug!("Created Replicate client");
        Ok(Self {
            http,
            api_token,
            settings,
        })
    }

    /// Settings in use.
    pub fn settings(&self) -> &ReplicateSettings {
        &self.settings
    }

    /// Run `model` on `input` and return its output once it has succeeded.
    ///
    /// # Errors
    ///
    /// Returns a transport error for network failures, HTTP error statuses
    /// and predictions that outlive the maximum wait, and a model error for
    /// failed or canceled predictions or missing output.
    #[instrument(skip(self, input), fields(model = %model))]
    pub async fn run(&self, model: &str, input: JsonValue) -> ReelResult<JsonValue> {
        let request = PredictionRequest::new(self.settings.base_url(), model, input);
        debug!(url = %request.url, "Creating prediction");

        let created = self
            .send(
                self.http
                    .post(&request.url)
                    .header("Prefer", "wait")
                    .json(&request.body),
            )
            .await?;
        let prediction = self.await_completion(created).await?;

        debug!(id = %prediction.id, "Prediction succeeded");
        prediction
            .output
            .ok_or_else(|| ModelError::new(format!("prediction {} has no output", prediction.id)).into())
    }

    async fn await_completion(&self, mut prediction: Prediction) -> ReelResult<Prediction> {
        let max_wait = Duration::from_secs(*self.settings.max_wait_secs());
        let poll_interval = Duration::from_millis(*self.settings.poll_interval_ms());
        let started = Instant::now();

        loop {
            match prediction.status {
                PredictionStatus::Succeeded => return Ok(prediction),
                PredictionStatus::Failed | PredictionStatus::Canceled => {
                    let message = prediction.error_message();
                    warn!(id = %prediction.id, status = %prediction.status, %message, "Prediction did not succeed");
                    return Err(ModelError::new(format!(
                        "prediction {} {}: {}",
                        prediction.id, prediction.status, message
                    ))
                    .into());
                }
                PredictionStatus::Starting | PredictionStatus::Processing => {}
            }

            if started.elapsed() >= max_wait {
                error!(id = %prediction.id, waited_secs = max_wait.as_secs(), "Prediction timed out");
                return Err(TransportError::new(TransportErrorKind::Timeout(max_wait.as_secs())).into());
            }

            let status_url = prediction.urls.get.clone().ok_or_else(|| {
                ModelError::new(format!("prediction {} has no status URL", prediction.id))
            })?;
            tokio::time::sleep(poll_interval).await;
            debug!(id = %prediction.id, status = %prediction.status, "Polling prediction");
            prediction = self.send(self.http.get(&status_url)).await?;
        }
    }

    async fn send(&self, request: RequestBuilder) -> ReelResult<Prediction> {
        let response = request
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| transport_error(&e, *self.settings.request_timeout_secs()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, error = %body, "Replicate API error");
            let kind = match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    TransportErrorKind::Auth(format!("{}: {}", status, body))
                }
                _ => TransportErrorKind::Status {
                    status_code: status.as_u16(),
                    message: body,
                },
            };
            return Err(TransportError::new(kind).into());
        }

        let text = response
            .text()
            .await
            .map_err(|e| transport_error(&e, *self.settings.request_timeout_secs()))?;
        serde_json::from_str(&text).map_err(|e| {
            error!(error = %e, response = %text, "Failed to parse prediction");
            JsonError::new(format!("Failed to parse prediction: {}", e)).into()
        })
    }
}

#[track_caller]
fn transport_error(error: &reqwest::Error, timeout_secs: u64) -> TransportError {
    if error.is_timeout() {
        TransportError::new(TransportErrorKind::Timeout(timeout_secs))
    } else {
        TransportError::new(TransportErrorKind::Request(error.to_string()))
    }
}
