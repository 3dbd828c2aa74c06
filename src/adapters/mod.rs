//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external libraries:
//! - `heuristic`: local rule-based scorer with injectable noise
//! - `remote`: HTTP client for the prediction endpoint
//! - `sqlite`: SQLite for local storage

pub mod heuristic;
pub mod remote;
pub mod sqlite;

// Re-export storage error for lib.rs
pub use sqlite::StorageError;
