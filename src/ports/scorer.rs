//! Scorer port: Trait for risk scoring strategies.
//!
//! Two implementations exist behind this seam: the local weighted-sum
//! heuristic and the remote prediction endpoint. Callers select one at
//! construction time; the assessment pipeline is agnostic to the choice.

use crate::domain::{PatientRecord, RiskAssessment};

/// Errors that can occur while obtaining a prediction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScoreError {
    /// The prediction source could not produce a result. Recoverable: the
    /// caller's form state is untouched and the submission may be retried.
    #[error("prediction unavailable: {0}")]
    PredictionUnavailable(String),
}

/// Trait for scoring a validated patient record.
///
/// Implementations must not mutate the record and must return a probability
/// in [0, 1]. A record that reaches a scorer has already passed validation;
/// scorers do not re-validate.
pub trait RiskScorer: Send + Sync {
    /// Score a patient record into a risk assessment.
    ///
    /// # Errors
    /// Returns `ScoreError::PredictionUnavailable` if the prediction source
    /// fails. The local heuristic only fails on an internal lock error; the
    /// remote strategy fails on transport errors, non-success responses, and
    /// malformed payloads.
    fn score(&self, record: &PatientRecord) -> Result<RiskAssessment, ScoreError>;
}
