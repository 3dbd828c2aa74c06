//! Storage port: Trait for persistent storage operations.
//!
//! This trait abstracts the storage backend (SQLite) from the application
//! logic. Persistence is best-effort from the assessment pipeline's point of
//! view: a failed save never fails the assessment itself.

use crate::domain::Assessment;

/// Trait for local storage operations.
///
/// All data is stored locally and never transmitted.
pub trait Storage: Send + Sync {
    /// Error type for storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save an assessment to storage.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn save_assessment(&self, assessment: &Assessment) -> Result<(), Self::Error>;

    /// Load all assessments from storage, newest first.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_assessments(&self) -> Result<Vec<Assessment>, Self::Error>;

    /// Load recent assessments (up to `limit`), newest first.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_recent(&self, limit: usize) -> Result<Vec<Assessment>, Self::Error>;

    /// Get the total count of assessments.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn count_assessments(&self) -> Result<usize, Self::Error>;

    /// Delete an assessment by ID.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn delete_assessment(&self, id: &str) -> Result<(), Self::Error>;

    /// Clear all stored assessments.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn clear_all(&self) -> Result<(), Self::Error>;
}
