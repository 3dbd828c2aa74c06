//! Risk assessment result types.
//!
//! Represents the output of a scoring strategy, either the local heuristic or
//! the remote prediction endpoint.

use serde::{Deserialize, Serialize};

use super::patient::PatientRecord;

/// Decision threshold for counting an assessment as a positive case.
///
/// Matches the remote endpoint's classification threshold.
pub const POSITIVE_THRESHOLD: f64 = 0.3;

/// Risk level classification for heart disease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    /// Low risk of heart disease
    Low,
    /// Medium risk, monitoring recommended
    Medium,
    /// High risk, intervention recommended
    High,
}

impl RiskCategory {
    /// Classify a probability using the fixed category thresholds.
    ///
    /// Boundaries are inclusive on the upper category: 0.3 is `Medium`,
    /// 0.6 is `High`.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.3 {
            Self::Low
        } else if probability < 0.6 {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// The clinical recommendation for this category.
    #[must_use]
    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::Low => "Maintain healthy lifestyle and routine check-ups",
            Self::Medium => "Consider lifestyle changes & regular monitoring",
            Self::High => "Consult cardiologist immediately",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Result of one scoring pass (before persistence).
///
/// Created fresh per submission and handed to the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Risk probability (0.0 to 1.0)
    pub probability: f64,

    /// Risk classification derived from the probability
    pub category: RiskCategory,

    /// Recommendation text keyed by category
    pub recommendation: String,
}

impl RiskAssessment {
    /// Create an assessment from a probability, deriving category and
    /// recommendation.
    #[must_use]
    pub fn new(probability: f64) -> Self {
        let category = RiskCategory::from_probability(probability);
        Self {
            probability,
            category,
            recommendation: category.recommendation().to_string(),
        }
    }

    /// Whether this assessment counts as a positive case.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.probability >= POSITIVE_THRESHOLD
    }
}

/// Complete assessment record including identity and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    /// Unique identifier
    pub id: String,

    /// The validated patient record the assessment was computed from
    pub record: PatientRecord,

    /// The scoring result
    pub result: RiskAssessment,

    /// Timestamp of assessment
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    /// Create a new assessment record.
    #[must_use]
    pub fn new(record: PatientRecord, result: RiskAssessment) -> Self {
        Self {
            id: random_id(),
            record,
            result,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Generate a UUID v4 (random) identifier using a CSPRNG.
///
/// Uses ChaCha20Rng seeded from OS entropy so identifiers are unpredictable
/// on all platforms.
fn random_id() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}
