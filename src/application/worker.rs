//! Background scoring worker for non-blocking assessment.
//!
//! Runs the assessment pipeline off the caller's thread so a rendering
//! collaborator stays responsive while a remote prediction is in flight. On
//! failure the terminal event is `Failed` and nothing else is emitted, which
//! leaves the caller in a defined idle state with no partial result.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::application::AssessmentService;
use crate::domain::{Assessment, FormSubmission};
use crate::ports::{RiskScorer, Storage};

/// Progress updates from the scoring worker.
#[derive(Debug, Clone)]
pub enum Progress {
    /// Validating the submission
    Validating,
    /// Submission valid, scoring in progress
    Scoring,
    /// Pipeline complete with assessment result
    Complete(Assessment),
    /// Pipeline failed; the submission is untouched and may be retried
    Failed(String),
}

/// Handle to a running scoring worker.
pub struct WorkerHandle {
    /// Receiver for progress updates
    pub progress_rx: Receiver<Progress>,
    /// Thread handle (for joining)
    _handle: JoinHandle<()>,
}

impl WorkerHandle {
    /// Try to receive the next progress update (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<Progress> {
        self.progress_rx.try_recv().ok()
    }

    /// Block until the pipeline reaches a terminal event.
    ///
    /// Returns `Complete` or `Failed`; intermediate updates are consumed.
    /// Returns `Failed` if the worker thread disappeared without reporting.
    #[must_use]
    pub fn wait(self) -> Progress {
        loop {
            match self.progress_rx.recv() {
                Ok(progress @ (Progress::Complete(_) | Progress::Failed(_))) => return progress,
                Ok(_) => {}
                Err(_) => return Progress::Failed("worker terminated unexpectedly".to_string()),
            }
        }
    }
}

/// Worker that runs the assessment pipeline in the background.
pub struct ScoringWorker;

impl ScoringWorker {
    /// Spawn a background assessment task.
    ///
    /// Returns a handle to receive progress updates.
    pub fn spawn<P, S>(
        service: Arc<AssessmentService<P, S>>,
        submission: FormSubmission,
    ) -> WorkerHandle
    where
        P: RiskScorer + 'static,
        S: Storage + 'static,
        S::Error: Into<crate::adapters::StorageError>,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::run_with_progress(&service, &submission, &tx);
        });

        WorkerHandle {
            progress_rx: rx,
            _handle: handle,
        }
    }

    fn run_with_progress<P, S>(
        service: &AssessmentService<P, S>,
        submission: &FormSubmission,
        tx: &Sender<Progress>,
    ) where
        P: RiskScorer,
        S: Storage,
        S::Error: Into<crate::adapters::StorageError>,
    {
        let _ = tx.send(Progress::Validating);
        let _ = tx.send(Progress::Scoring);

        match service.assess(submission) {
            Ok(assessment) => {
                let _ = tx.send(Progress::Complete(assessment));
            }
            Err(e) => {
                let _ = tx.send(Progress::Failed(e.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::heuristic::{FixedNoise, HeuristicScorer};
    use crate::adapters::sqlite::SqliteStorage;
    use crate::domain::RiskCategory;

    fn create_test_service() -> Arc<AssessmentService<HeuristicScorer<FixedNoise>, SqliteStorage>>
    {
        let scorer = Arc::new(HeuristicScorer::new(FixedNoise::neutral()));
        let storage = Arc::new(SqliteStorage::in_memory().expect("Should create db"));
        Arc::new(AssessmentService::new(scorer, storage))
    }

    fn valid_submission() -> FormSubmission {
        FormSubmission::from_pairs([
            ("age", "70"),
            ("sex", "0"),
            ("cp", "1"),
            ("trestbps", "140"),
            ("chol", "260"),
            ("fbs", "1"),
            ("restecg", "0"),
            ("thalach", "130"),
            ("exang", "0"),
            ("oldpeak", "1.5"),
            ("slope", "1"),
            ("ca", "1"),
            ("thal", "3"),
        ])
    }

    #[test]
    fn test_worker_completes() {
        let handle = ScoringWorker::spawn(create_test_service(), valid_submission());

        match handle.wait() {
            Progress::Complete(assessment) => {
                // age > 60, typical angina, chol > 240
                assert!((assessment.result.probability - 0.6).abs() < 1e-9);
                assert_eq!(assessment.result.category, RiskCategory::High);
            }
            other => panic!("Expected completion, got {other:?}"),
        }
    }

    #[test]
    fn test_worker_reports_failure_terminally() {
        let mut submission = valid_submission();
        submission.set("age", "seventy");

        let handle = ScoringWorker::spawn(create_test_service(), submission);

        match handle.wait() {
            Progress::Failed(message) => {
                assert!(message.contains("age"), "message was: {message}");
            }
            other => panic!("Expected failure, got {other:?}"),
        }
    }
}
