//! # HeartSense
//!
//! Heart disease risk assessment core.
//!
//! This crate provides:
//! - Strict validation of raw patient intake forms
//! - Risk scoring via a local heuristic or a remote prediction endpoint
//! - Local assessment history with dashboard aggregates
//!
//! Rendering (charts, result panels) is an external collaborator: the crate
//! exposes validated records and assessment results and performs no visual
//! output itself.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (PatientRecord, validation, RiskAssessment)
//! - `ports`: Trait definitions for external operations
//! - `application`: Use cases orchestrating domain and ports
//! - `adapters`: Concrete implementations (heuristic scorer, HTTP client, SQLite)

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use domain::{Assessment, FormSubmission, PatientRecord, RiskAssessment, RiskCategory};

/// Result type for HeartSense operations
pub type Result<T> = std::result::Result<T, HeartSenseError>;

/// Main error type for HeartSense
#[derive(Debug, thiserror::Error)]
pub enum HeartSenseError {
    #[error("Invalid submission: {0}")]
    Validation(#[from] domain::ValidationErrors),

    #[error("Scoring failed: {0}")]
    Prediction(#[from] ports::ScoreError),

    #[error("Storage operation failed: {0}")]
    Storage(#[from] adapters::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
