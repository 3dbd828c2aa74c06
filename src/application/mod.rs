//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

mod analytics;
mod assessment;
mod worker;

pub use analytics::{DashboardStats, RiskDistribution, StatsService};
pub use assessment::AssessmentService;
pub use worker::{Progress, ScoringWorker, WorkerHandle};
