//! Assessment service: Orchestrates the risk assessment pipeline.
//!
//! This service coordinates:
//! - Form validation
//! - Scoring (local heuristic or remote endpoint)
//! - Best-effort persistence

use std::sync::Arc;

use crate::domain::{validate, Assessment, FormSubmission};
use crate::ports::{RiskScorer, Storage};
use crate::HeartSenseError;

/// Service for running the full assessment pipeline.
///
/// Generic over the scoring strategy and the storage backend, so the local
/// heuristic and the remote endpoint are interchangeable behind the same
/// call.
pub struct AssessmentService<P, S>
where
    P: RiskScorer,
    S: Storage,
{
    scorer: Arc<P>,
    storage: Arc<S>,
}

impl<P, S> AssessmentService<P, S>
where
    P: RiskScorer,
    S: Storage,
    S::Error: Into<crate::adapters::StorageError>,
{
    /// Create a new assessment service.
    pub fn new(scorer: Arc<P>, storage: Arc<S>) -> Self {
        Self { scorer, storage }
    }

    /// Run the full pipeline on a raw form submission.
    ///
    /// Performs:
    /// 1. Validate the submission into a complete record
    /// 2. Score the record
    /// 3. Save the assessment (best-effort; a storage failure is logged,
    ///    never propagated)
    ///
    /// On any error the submission is untouched, so the caller can let the
    /// user correct fields or retry as-is.
    ///
    /// # Errors
    /// Returns `HeartSenseError::Validation` listing every invalid field, or
    /// `HeartSenseError::Prediction` if the scoring strategy fails.
    pub fn assess(&self, submission: &FormSubmission) -> Result<Assessment, HeartSenseError> {
        tracing::info!("Starting assessment pipeline...");

        let record = validate(submission)?;
        let result = self.scorer.score(&record)?;
        let assessment = Assessment::new(record, result);

        if let Err(e) = self.storage.save_assessment(&assessment) {
            let se: crate::adapters::StorageError = e.into();
            tracing::warn!("Failed to save assessment: {:?}", se);
        }

        tracing::info!(
            "Assessment complete: probability={:.2}, category={}",
            assessment.result.probability,
            assessment.result.category
        );

        Ok(assessment)
    }

    /// Get recent assessments from storage, newest first.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn recent_assessments(&self, limit: usize) -> Result<Vec<Assessment>, HeartSenseError> {
        self.storage
            .load_recent(limit)
            .map_err(|e| HeartSenseError::Storage(e.into()))
    }

    /// Get total assessment count.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn assessment_count(&self) -> Result<usize, HeartSenseError> {
        self.storage
            .count_assessments()
            .map_err(|e| HeartSenseError::Storage(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::heuristic::{FixedNoise, HeuristicScorer};
    use crate::adapters::sqlite::SqliteStorage;
    use crate::domain::RiskCategory;

    fn create_test_service() -> AssessmentService<HeuristicScorer<FixedNoise>, SqliteStorage> {
        let scorer = Arc::new(HeuristicScorer::new(FixedNoise::neutral()));
        let storage = Arc::new(SqliteStorage::in_memory().expect("Should create db"));
        AssessmentService::new(scorer, storage)
    }

    fn high_risk_submission() -> FormSubmission {
        FormSubmission::from_pairs([
            ("age", "65"),
            ("sex", "1"),
            ("cp", "1"),
            ("trestbps", "150"),
            ("chol", "250"),
            ("fbs", "0"),
            ("restecg", "1"),
            ("thalach", "110"),
            ("exang", "1"),
            ("oldpeak", "2.0"),
            ("slope", "2"),
            ("ca", "2"),
            ("thal", "7"),
        ])
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let service = create_test_service();

        let assessment = service
            .assess(&high_risk_submission())
            .expect("Should assess");

        assert!((assessment.result.probability - 0.95).abs() < 1e-9);
        assert_eq!(assessment.result.category, RiskCategory::High);
        assert_eq!(
            assessment.result.recommendation,
            "Consult cardiologist immediately"
        );

        // Assessment was persisted.
        assert_eq!(service.assessment_count().expect("Should count"), 1);
        let recent = service.recent_assessments(5).expect("Should load");
        assert_eq!(recent[0].id, assessment.id);
    }

    #[test]
    fn test_invalid_submission_reports_every_field() {
        let service = create_test_service();

        let mut submission = high_risk_submission();
        submission.set("age", "");
        submission.set("chol", "abc");
        submission.set("thal", "5");

        let err = service.assess(&submission).expect_err("Should fail");
        match err {
            HeartSenseError::Validation(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.contains_field("age"));
                assert!(errors.contains_field("chol"));
                assert!(errors.contains_field("thal"));
            }
            other => panic!("Expected validation error, got {other:?}"),
        }

        // Nothing was persisted.
        assert_eq!(service.assessment_count().expect("Should count"), 0);
    }

    #[test]
    fn test_failing_scorer_surfaces_prediction_error() {
        use crate::domain::{PatientRecord, RiskAssessment};
        use crate::ports::{RiskScorer, ScoreError};

        struct FailingScorer;

        impl RiskScorer for FailingScorer {
            fn score(&self, _: &PatientRecord) -> Result<RiskAssessment, ScoreError> {
                Err(ScoreError::PredictionUnavailable(
                    "endpoint unreachable".to_string(),
                ))
            }
        }

        let storage = Arc::new(SqliteStorage::in_memory().expect("Should create db"));
        let service = AssessmentService::new(Arc::new(FailingScorer), Arc::clone(&storage));

        let err = service
            .assess(&high_risk_submission())
            .expect_err("Should fail");
        assert!(matches!(err, HeartSenseError::Prediction(_)));

        // No partial result was persisted.
        assert_eq!(service.assessment_count().expect("Should count"), 0);
    }
}
