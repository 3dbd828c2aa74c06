//! Patient record types for heart disease risk assessment.
//!
//! Fields follow the UCI heart-disease dataset convention, which is also the
//! wire format expected by the remote prediction endpoint.

use serde::{Deserialize, Serialize};

/// Patient's biological sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Map a form option code to the variant.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Male),
            0 => Some(Self::Female),
            _ => None,
        }
    }

    /// The form option code (UCI convention).
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Male => 1,
            Self::Female => 0,
        }
    }
}

/// Type of chest pain experienced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChestPain {
    TypicalAngina,
    AtypicalAngina,
    NonAnginal,
    Asymptomatic,
}

impl ChestPain {
    /// Map a form option code to the variant.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::TypicalAngina),
            2 => Some(Self::AtypicalAngina),
            3 => Some(Self::NonAnginal),
            4 => Some(Self::Asymptomatic),
            _ => None,
        }
    }

    /// The form option code (UCI convention).
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::TypicalAngina => 1,
            Self::AtypicalAngina => 2,
            Self::NonAnginal => 3,
            Self::Asymptomatic => 4,
        }
    }
}

/// Resting electrocardiographic result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestEcg {
    Normal,
    StTAbnormality,
    LvHypertrophy,
}

impl RestEcg {
    /// Map a form option code to the variant.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Normal),
            1 => Some(Self::StTAbnormality),
            2 => Some(Self::LvHypertrophy),
            _ => None,
        }
    }

    /// The form option code (UCI convention).
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Normal => 0,
            Self::StTAbnormality => 1,
            Self::LvHypertrophy => 2,
        }
    }
}

/// Slope of the peak exercise ST segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slope {
    Upsloping,
    Flat,
    Downsloping,
}

impl Slope {
    /// Map a form option code to the variant.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Upsloping),
            2 => Some(Self::Flat),
            3 => Some(Self::Downsloping),
            _ => None,
        }
    }

    /// The form option code (UCI convention).
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Upsloping => 1,
            Self::Flat => 2,
            Self::Downsloping => 3,
        }
    }
}

/// Thalassemia finding.
///
/// The UCI codes are non-contiguous (3, 6, 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Thal {
    Normal,
    FixedDefect,
    ReversibleDefect,
}

impl Thal {
    /// Map a form option code to the variant.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            3 => Some(Self::Normal),
            6 => Some(Self::FixedDefect),
            7 => Some(Self::ReversibleDefect),
            _ => None,
        }
    }

    /// The form option code (UCI convention).
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Normal => 3,
            Self::FixedDefect => 6,
            Self::ReversibleDefect => 7,
        }
    }
}

/// A complete, validated patient record.
///
/// Constructed from raw form input by [`crate::domain::validate`], which
/// guarantees every field is present and within its declared bounds before a
/// record reaches a scorer. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Age in years (18-100)
    pub age: u32,

    /// Biological sex
    pub sex: Sex,

    /// Chest pain type
    pub cp: ChestPain,

    /// Resting blood pressure in mm Hg (80-200)
    pub trestbps: u32,

    /// Serum cholesterol in mg/dl (100-600)
    pub chol: u32,

    /// Fasting blood sugar > 120 mg/dl
    pub fbs: bool,

    /// Resting ECG result
    pub restecg: RestEcg,

    /// Maximum heart rate achieved (60-220)
    pub thalach: u32,

    /// Exercise induced angina
    pub exang: bool,

    /// ST depression induced by exercise (0-10)
    pub oldpeak: f64,

    /// Slope of peak exercise ST segment
    pub slope: Slope,

    /// Number of major vessels colored by fluoroscopy (0-3)
    pub ca: u8,

    /// Thalassemia finding
    pub thal: Thal,
}

impl PatientRecord {
    /// Serialize the record as form field-value pairs in submission order.
    ///
    /// Order matches the remote endpoint's feature columns:
    /// age, sex, cp, trestbps, chol, fbs, restecg, thalach, exang, oldpeak, slope, ca, thal
    #[must_use]
    pub fn to_form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("age", self.age.to_string()),
            ("sex", self.sex.code().to_string()),
            ("cp", self.cp.code().to_string()),
            ("trestbps", self.trestbps.to_string()),
            ("chol", self.chol.to_string()),
            ("fbs", i64::from(self.fbs).to_string()),
            ("restecg", self.restecg.code().to_string()),
            ("thalach", self.thalach.to_string()),
            ("exang", i64::from(self.exang).to_string()),
            ("oldpeak", self.oldpeak.to_string()),
            ("slope", self.slope.code().to_string()),
            ("ca", self.ca.to_string()),
            ("thal", self.thal.code().to_string()),
        ]
    }
}

/// Field names in submission order, matching the remote endpoint's columns.
pub const FIELD_NAMES: [&str; 13] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    "slope", "ca", "thal",
];
