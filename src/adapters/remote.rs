//! Remote adapter: scoring via the prediction endpoint.
//!
//! Posts the record as form fields to `/predict` and interprets the JSON
//! reply. The endpoint only answers JSON to requests marked as XHR, so the
//! client sends the `X-Requested-With` header. Any transport failure,
//! non-success status, or malformed payload surfaces as
//! `ScoreError::PredictionUnavailable`; the caller's form state is untouched
//! and the submission may be retried.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::{PatientRecord, RiskAssessment};
use crate::ports::{RiskScorer, ScoreError};

const DEFAULT_PREDICT_URL: &str = "http://127.0.0.1:5000/predict";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

const PREDICT_URL_ENV: &str = "HEARTSENSE_PREDICT_URL";
const TIMEOUT_ENV: &str = "HEARTSENSE_HTTP_TIMEOUT_SECS";

/// Configuration for the remote prediction client.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Full URL of the prediction endpoint
    pub predict_url: String,
    /// Request timeout; the request is abandoned once it elapses
    pub timeout: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            predict_url: DEFAULT_PREDICT_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl RemoteConfig {
    /// Build a configuration from the environment, falling back to defaults.
    ///
    /// Reads `HEARTSENSE_PREDICT_URL` and `HEARTSENSE_HTTP_TIMEOUT_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(PREDICT_URL_ENV) {
            if !url.trim().is_empty() {
                config.predict_url = url;
            }
        }
        if let Some(secs) = std::env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }
}

/// JSON reply from the prediction endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    /// Human-readable prediction summary
    pub prediction: String,
    /// Disease probability in [0, 1]
    pub probability: f64,
    /// Whether the endpoint classified the case as positive
    pub is_positive: bool,
    /// Decision threshold the endpoint applied, if reported
    #[serde(default)]
    pub threshold: Option<f64>,
}

impl PredictResponse {
    /// Interpret the reply as a risk assessment.
    ///
    /// # Errors
    /// Returns `PredictionUnavailable` if the reported probability is outside
    /// [0, 1].
    pub fn into_assessment(self) -> Result<RiskAssessment, ScoreError> {
        if !(0.0..=1.0).contains(&self.probability) || !self.probability.is_finite() {
            return Err(ScoreError::PredictionUnavailable(format!(
                "endpoint returned probability {} outside [0, 1]",
                self.probability
            )));
        }
        Ok(RiskAssessment::new(self.probability))
    }
}

/// Error payload the endpoint returns on a failed prediction.
#[derive(Debug, Deserialize)]
struct PredictError {
    error: String,
}

/// Scorer that delegates to the remote prediction endpoint.
pub struct RemoteScorer {
    config: RemoteConfig,
    client: reqwest::blocking::Client,
}

impl RemoteScorer {
    /// Create a remote scorer with the given configuration.
    ///
    /// # Errors
    /// Returns `PredictionUnavailable` if the HTTP client cannot be built.
    pub fn new(config: RemoteConfig) -> Result<Self, ScoreError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ScoreError::PredictionUnavailable(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a remote scorer configured from the environment.
    ///
    /// # Errors
    /// Returns `PredictionUnavailable` if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, ScoreError> {
        Self::new(RemoteConfig::from_env())
    }
}

impl RiskScorer for RemoteScorer {
    fn score(&self, record: &PatientRecord) -> Result<RiskAssessment, ScoreError> {
        tracing::info!(url = %self.config.predict_url, "requesting remote prediction");

        let response = self
            .client
            .post(&self.config.predict_url)
            .header("X-Requested-With", "XMLHttpRequest")
            .form(&record.to_form_fields())
            .send()
            .map_err(|e| ScoreError::PredictionUnavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ScoreError::PredictionUnavailable(e.to_string()))?;

        if !status.is_success() {
            // Failed predictions carry an error payload worth surfacing.
            let detail = serde_json::from_str::<PredictError>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| format!("endpoint returned status {status}"));
            return Err(ScoreError::PredictionUnavailable(detail));
        }

        let reply: PredictResponse = serde_json::from_str(&body)
            .map_err(|e| ScoreError::PredictionUnavailable(format!("malformed reply: {e}")))?;

        tracing::info!(
            probability = reply.probability,
            is_positive = reply.is_positive,
            "remote prediction received"
        );

        reply.into_assessment()
    }
}
