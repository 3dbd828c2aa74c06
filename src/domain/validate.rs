//! Form validation: raw submission -> complete [`PatientRecord`].
//!
//! Validation is a pure function over the submitted field map. Every declared
//! field is checked in one pass and all failures are collected, so a caller
//! can display one error per field. A record is only constructed when every
//! field is present and within bounds.
//!
//! Declared fields and bounds:
//!
//! | field | kind | domain |
//! |---|---|---|
//! | age | integer | 18-100 |
//! | sex | option | 1, 0 |
//! | cp | option | 1-4 |
//! | trestbps | integer | 80-200 |
//! | chol | integer | 100-600 |
//! | fbs | flag | 0, 1 |
//! | restecg | option | 0-2 |
//! | thalach | integer | 60-220 |
//! | exang | flag | 0, 1 |
//! | oldpeak | decimal | 0-10 |
//! | slope | option | 1-3 |
//! | ca | integer | 0-3 |
//! | thal | option | 3, 6, 7 |
//!
//! The form advertises a 0.1 step on `oldpeak`; that is an input hint, not a
//! validation rule.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::patient::{ChestPain, PatientRecord, RestEcg, Sex, Slope, Thal};

/// Raw form input: field name -> submitted value, as entered by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormSubmission {
    fields: HashMap<String, String>,
}

impl FormSubmission {
    /// Create an empty submission.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a submission from field-value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set a field value, replacing any previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Get a field value with surrounding whitespace removed.
    ///
    /// Returns `None` if the field is absent or empty after trimming.
    #[must_use]
    pub fn get_trimmed(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Why a single field failed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FieldErrorKind {
    #[error("required field is missing or empty")]
    MissingField,

    #[error("value {value:?} is not a valid number")]
    NotANumber { value: String },

    #[error("value {value} out of range [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },

    #[error("value {value:?} is not a valid option")]
    InvalidOption { value: String },
}

/// A validation failure for one named field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// The field that failed
    pub field: &'static str,
    /// What went wrong
    pub kind: FieldErrorKind,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// All field errors from one validation pass, in submission order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    /// Whether a specific field is among the failures.
    #[must_use]
    pub fn contains_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for err in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{err}")?;
            first = false;
        }
        Ok(())
    }
}

/// Validate a raw submission into a complete [`PatientRecord`].
///
/// Checks every declared field and collects all failures rather than stopping
/// at the first, so the result enumerates each invalid field.
///
/// # Errors
/// Returns [`ValidationErrors`] listing every field that is missing, not a
/// number, out of range, or not a declared option.
pub fn validate(submission: &FormSubmission) -> Result<PatientRecord, ValidationErrors> {
    let mut errors = Vec::new();
    let e = &mut errors;
    let s = submission;

    let age = integer_field(e, s, "age", 18, 100);
    let sex = option_field(e, s, "sex", Sex::from_code);
    let cp = option_field(e, s, "cp", ChestPain::from_code);
    let trestbps = integer_field(e, s, "trestbps", 80, 200);
    let chol = integer_field(e, s, "chol", 100, 600);
    let fbs = flag_field(e, s, "fbs");
    let restecg = option_field(e, s, "restecg", RestEcg::from_code);
    let thalach = integer_field(e, s, "thalach", 60, 220);
    let exang = flag_field(e, s, "exang");
    let oldpeak = decimal_field(e, s, "oldpeak", 0.0, 10.0);
    let slope = option_field(e, s, "slope", Slope::from_code);
    let ca = integer_field(e, s, "ca", 0, 3);
    let thal = option_field(e, s, "thal", Thal::from_code);

    match (
        age, sex, cp, trestbps, chol, fbs, restecg, thalach, exang, oldpeak, slope, ca, thal,
    ) {
        (
            Some(age),
            Some(sex),
            Some(cp),
            Some(trestbps),
            Some(chol),
            Some(fbs),
            Some(restecg),
            Some(thalach),
            Some(exang),
            Some(oldpeak),
            Some(slope),
            Some(ca),
            Some(thal),
        ) => Ok(PatientRecord {
            age: age as u32,
            sex,
            cp,
            trestbps: trestbps as u32,
            chol: chol as u32,
            fbs,
            restecg,
            thalach: thalach as u32,
            exang,
            oldpeak,
            slope,
            ca: ca as u8,
            thal,
        }),
        _ => Err(ValidationErrors(errors)),
    }
}

/// Check presence, returning the trimmed raw value or recording the error.
fn present<'a>(
    errors: &mut Vec<FieldError>,
    submission: &'a FormSubmission,
    field: &'static str,
) -> Option<&'a str> {
    let raw = submission.get_trimmed(field);
    if raw.is_none() {
        errors.push(FieldError {
            field,
            kind: FieldErrorKind::MissingField,
        });
    }
    raw
}

fn integer_field(
    errors: &mut Vec<FieldError>,
    submission: &FormSubmission,
    field: &'static str,
    min: i64,
    max: i64,
) -> Option<i64> {
    let raw = present(errors, submission, field)?;

    let Some(value) = parse_integer(raw) else {
        errors.push(FieldError {
            field,
            kind: FieldErrorKind::NotANumber {
                value: raw.to_string(),
            },
        });
        return None;
    };

    if value < min || value > max {
        errors.push(FieldError {
            field,
            kind: FieldErrorKind::OutOfRange {
                value: value as f64,
                min: min as f64,
                max: max as f64,
            },
        });
        return None;
    }

    Some(value)
}

fn decimal_field(
    errors: &mut Vec<FieldError>,
    submission: &FormSubmission,
    field: &'static str,
    min: f64,
    max: f64,
) -> Option<f64> {
    let raw = present(errors, submission, field)?;

    let value = match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            errors.push(FieldError {
                field,
                kind: FieldErrorKind::NotANumber {
                    value: raw.to_string(),
                },
            });
            return None;
        }
    };

    if value < min || value > max {
        errors.push(FieldError {
            field,
            kind: FieldErrorKind::OutOfRange { value, min, max },
        });
        return None;
    }

    Some(value)
}

fn option_field<T>(
    errors: &mut Vec<FieldError>,
    submission: &FormSubmission,
    field: &'static str,
    from_code: fn(i64) -> Option<T>,
) -> Option<T> {
    let raw = present(errors, submission, field)?;

    let parsed = parse_integer(raw).and_then(from_code);
    if parsed.is_none() {
        errors.push(FieldError {
            field,
            kind: FieldErrorKind::InvalidOption {
                value: raw.to_string(),
            },
        });
    }
    parsed
}

fn flag_field(
    errors: &mut Vec<FieldError>,
    submission: &FormSubmission,
    field: &'static str,
) -> Option<bool> {
    let raw = present(errors, submission, field)?;

    match parse_integer(raw) {
        Some(0) => Some(false),
        Some(1) => Some(true),
        _ => {
            errors.push(FieldError {
                field,
                kind: FieldErrorKind::InvalidOption {
                    value: raw.to_string(),
                },
            });
            None
        }
    }
}

/// Parse an integer field, also accepting decimal syntax with a zero
/// fractional part ("63.0"), which number inputs may submit.
fn parse_integer(raw: &str) -> Option<i64> {
    if let Ok(v) = raw.parse::<i64>() {
        return Some(v);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 => Some(v as i64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_submission() -> FormSubmission {
        FormSubmission::from_pairs([
            ("age", "63"),
            ("sex", "1"),
            ("cp", "1"),
            ("trestbps", "145"),
            ("chol", "233"),
            ("fbs", "1"),
            ("restecg", "0"),
            ("thalach", "150"),
            ("exang", "0"),
            ("oldpeak", "2.3"),
            ("slope", "3"),
            ("ca", "0"),
            ("thal", "6"),
        ])
    }

    #[test]
    fn test_complete_submission_validates() {
        let record = validate(&complete_submission()).expect("Should validate");

        assert_eq!(record.age, 63);
        assert_eq!(record.sex, Sex::Male);
        assert_eq!(record.cp, ChestPain::TypicalAngina);
        assert_eq!(record.trestbps, 145);
        assert_eq!(record.chol, 233);
        assert!(record.fbs);
        assert_eq!(record.restecg, RestEcg::Normal);
        assert_eq!(record.thalach, 150);
        assert!(!record.exang);
        assert!((record.oldpeak - 2.3).abs() < f64::EPSILON);
        assert_eq!(record.slope, Slope::Downsloping);
        assert_eq!(record.ca, 0);
        assert_eq!(record.thal, Thal::FixedDefect);
    }

    #[test]
    fn test_missing_field_is_reported_by_name() {
        for name in crate::domain::FIELD_NAMES {
            let mut submission = complete_submission();
            submission.set(name, "");

            let errors = validate(&submission).expect_err("Should fail");
            assert!(errors.contains_field(name), "missing {name} not reported");
            assert_eq!(
                errors.0[0].kind,
                FieldErrorKind::MissingField,
                "wrong kind for {name}"
            );
        }
    }

    #[test]
    fn test_whitespace_only_value_is_missing() {
        let mut submission = complete_submission();
        submission.set("age", "   ");

        let errors = validate(&submission).expect_err("Should fail");
        assert_eq!(errors.0[0].kind, FieldErrorKind::MissingField);
    }

    #[test]
    fn test_all_errors_collected_in_one_pass() {
        let errors = validate(&FormSubmission::new()).expect_err("Should fail");
        assert_eq!(errors.len(), 13);
    }

    #[test]
    fn test_errors_follow_submission_order() {
        let errors = validate(&FormSubmission::new()).expect_err("Should fail");
        let fields: Vec<&str> = errors.0.iter().map(|e| e.field).collect();
        assert_eq!(fields, crate::domain::FIELD_NAMES);
    }

    #[test]
    fn test_numeric_bounds_are_inclusive() {
        let cases = [
            ("age", 18, 100),
            ("trestbps", 80, 200),
            ("chol", 100, 600),
            ("thalach", 60, 220),
            ("ca", 0, 3),
        ];

        for (name, min, max) in cases {
            for ok in [min, max] {
                let mut submission = complete_submission();
                submission.set(name, ok.to_string());
                let record = validate(&submission);
                assert!(record.is_ok(), "{name}={ok} should be accepted");
            }

            for bad in [min - 1, max + 1] {
                let mut submission = complete_submission();
                submission.set(name, bad.to_string());
                let errors = validate(&submission).expect_err("Should fail");
                assert!(
                    matches!(errors.0[0].kind, FieldErrorKind::OutOfRange { .. }),
                    "{name}={bad} should be out of range"
                );
            }
        }
    }

    #[test]
    fn test_oldpeak_bounds() {
        for ok in ["0", "10", "5.5"] {
            let mut submission = complete_submission();
            submission.set("oldpeak", ok);
            assert!(validate(&submission).is_ok(), "oldpeak={ok}");
        }

        for bad in ["-0.1", "10.1"] {
            let mut submission = complete_submission();
            submission.set("oldpeak", bad);
            let errors = validate(&submission).expect_err("Should fail");
            assert!(matches!(
                errors.0[0].kind,
                FieldErrorKind::OutOfRange { .. }
            ));
        }
    }

    #[test]
    fn test_not_a_number() {
        let mut submission = complete_submission();
        submission.set("chol", "plenty");

        let errors = validate(&submission).expect_err("Should fail");
        assert_eq!(
            errors.0[0].kind,
            FieldErrorKind::NotANumber {
                value: "plenty".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_option() {
        for (name, bad) in [("cp", "9"), ("thal", "5"), ("exang", "2"), ("sex", "x")] {
            let mut submission = complete_submission();
            submission.set(name, bad);

            let errors = validate(&submission).expect_err("Should fail");
            assert!(
                matches!(errors.0[0].kind, FieldErrorKind::InvalidOption { .. }),
                "{name}={bad} should be an invalid option"
            );
        }
    }

    #[test]
    fn test_integer_accepts_zero_fraction_decimal() {
        let mut submission = complete_submission();
        submission.set("age", "63.0");

        let record = validate(&submission).expect("Should validate");
        assert_eq!(record.age, 63);
    }

    #[test]
    fn test_validation_is_pure() {
        let submission = complete_submission();
        let first = validate(&submission).expect("Should validate");
        let second = validate(&submission).expect("Should validate");
        assert_eq!(first, second);
    }
}
