//! Analytics service: aggregate statistics for the clinician dashboard.
//!
//! Computes case counts and the risk-level distribution over stored
//! assessments. Aggregates carry no patient identifiers.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::RiskCategory;
use crate::ports::Storage;
use crate::HeartSenseError;

/// Assessment counts per risk category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// Aggregate statistics over all stored assessments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Total assessments on record
    pub total_patients: usize,
    /// Assessments at or above the positive decision threshold
    pub positive_cases: usize,
    /// Assessments below the positive decision threshold
    pub negative_cases: usize,
    /// Breakdown by risk category
    pub risk_distribution: RiskDistribution,
}

/// Service for dashboard aggregates.
pub struct StatsService<S>
where
    S: Storage,
{
    storage: Arc<S>,
}

impl<S> StatsService<S>
where
    S: Storage,
    S::Error: Into<crate::adapters::StorageError>,
{
    /// Create a new stats service.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Compute aggregate statistics over every stored assessment.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn dashboard_stats(&self) -> Result<DashboardStats, HeartSenseError> {
        let assessments = self
            .storage
            .load_assessments()
            .map_err(|e| HeartSenseError::Storage(e.into()))?;

        let mut stats = DashboardStats {
            total_patients: assessments.len(),
            ..DashboardStats::default()
        };

        for assessment in &assessments {
            if assessment.result.is_positive() {
                stats.positive_cases += 1;
            } else {
                stats.negative_cases += 1;
            }

            match assessment.result.category {
                RiskCategory::Low => stats.risk_distribution.low += 1,
                RiskCategory::Medium => stats.risk_distribution.medium += 1,
                RiskCategory::High => stats.risk_distribution.high += 1,
            }
        }

        tracing::info!(
            total = stats.total_patients,
            positive = stats.positive_cases,
            negative = stats.negative_cases,
            "dashboard statistics computed"
        );

        Ok(stats)
    }
}
