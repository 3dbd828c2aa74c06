//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no external dependencies.
//! All types are serializable and implement strict validation.

mod assessment;
mod patient;
mod validate;

pub use assessment::{Assessment, RiskAssessment, RiskCategory, POSITIVE_THRESHOLD};
pub use patient::{ChestPain, PatientRecord, RestEcg, Sex, Slope, Thal, FIELD_NAMES};
pub use validate::{validate, FieldError, FieldErrorKind, FormSubmission, ValidationErrors};
