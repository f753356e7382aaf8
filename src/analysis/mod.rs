//! Periodicity analysis of edge fields

/// Edge autocorrelation profiles per axis
pub mod correlation;
/// Grid period estimation and its result types
pub mod estimator;
/// Harmonic-aware peak extraction from correlation profiles
pub mod peaks;

pub use estimator::{EstimationResult, EstimatorConfig, GridPeriodEstimator, estimate};
