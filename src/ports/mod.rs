//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (scoring strategy, random
//! source, storage).

mod noise;
mod scorer;
mod storage;

pub use noise::NoiseSource;
pub use scorer::{RiskScorer, ScoreError};
pub use storage::Storage;
