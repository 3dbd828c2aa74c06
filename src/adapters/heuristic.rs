//! Heuristic adapter: local weighted-sum risk scorer.
//!
//! A rule-based approximation, not a trained model. Each triggered rule adds
//! a fixed contribution; rules are evaluated independently and are not
//! mutually exclusive. A symmetric random perturbation is added on top, then
//! the result is clamped to [0, 1].

use std::sync::Mutex;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::domain::{ChestPain, PatientRecord, RiskAssessment};
use crate::ports::{NoiseSource, RiskScorer, ScoreError};

/// Noise source backed by ChaCha20 seeded from OS entropy.
#[derive(Debug)]
pub struct EntropyNoise(ChaCha20Rng);

impl EntropyNoise {
    /// Create a noise source seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self(ChaCha20Rng::from_entropy())
    }
}

impl Default for EntropyNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseSource for EntropyNoise {
    fn sample(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Deterministic noise source seeded from a caller-supplied value.
///
/// Reproducible: the same seed yields the same sample sequence.
#[derive(Debug)]
pub struct SeededNoise(ChaCha20Rng);

impl SeededNoise {
    /// Create a noise source from a fixed seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(ChaCha20Rng::seed_from_u64(seed))
    }
}

impl NoiseSource for SeededNoise {
    fn sample(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Noise source returning a constant sample.
///
/// `FixedNoise::neutral()` returns 0.5 on every draw, which cancels the
/// perturbation term entirely and makes the scorer a pure function of the
/// record.
#[derive(Debug, Clone, Copy)]
pub struct FixedNoise(pub f64);

impl FixedNoise {
    /// A source whose samples contribute zero perturbation.
    #[must_use]
    pub fn neutral() -> Self {
        Self(0.5)
    }
}

impl NoiseSource for FixedNoise {
    fn sample(&mut self) -> f64 {
        self.0
    }
}

/// Additive rule contributions.
const AGE_OVER_60: f64 = 0.20;
const TYPICAL_ANGINA: f64 = 0.25;
const CHOL_OVER_240: f64 = 0.15;
const THALACH_UNDER_120: f64 = 0.20;
const EXERCISE_ANGINA: f64 = 0.15;

/// Width of the symmetric noise band: perturbation lies in [-0.1, +0.1].
const NOISE_SPAN: f64 = 0.2;

/// Local rule-based risk scorer.
pub struct HeuristicScorer<N: NoiseSource> {
    noise: Mutex<N>,
}

impl Default for HeuristicScorer<EntropyNoise> {
    fn default() -> Self {
        Self::new(EntropyNoise::new())
    }
}

impl<N: NoiseSource> HeuristicScorer<N> {
    /// Create a scorer with the given noise source.
    pub fn new(noise: N) -> Self {
        Self {
            noise: Mutex::new(noise),
        }
    }
}

impl<N: NoiseSource> RiskScorer for HeuristicScorer<N> {
    fn score(&self, record: &PatientRecord) -> Result<RiskAssessment, ScoreError> {
        let mut risk = 0.0;

        if record.age > 60 {
            risk += AGE_OVER_60;
        }
        if record.cp == ChestPain::TypicalAngina {
            risk += TYPICAL_ANGINA;
        }
        if record.chol > 240 {
            risk += CHOL_OVER_240;
        }
        if record.thalach < 120 {
            risk += THALACH_UNDER_120;
        }
        if record.exang {
            risk += EXERCISE_ANGINA;
        }

        let sample = self
            .noise
            .lock()
            .map_err(|_| ScoreError::PredictionUnavailable("noise source lock poisoned".to_string()))?
            .sample();
        risk += (sample - 0.5) * NOISE_SPAN;

        let probability = risk.clamp(0.0, 1.0);

        tracing::debug!(
            probability,
            category = %crate::domain::RiskCategory::from_probability(probability),
            "heuristic score computed"
        );

        Ok(RiskAssessment::new(probability))
    }
}
