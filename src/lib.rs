//! Grid size detection for pixel art using edge autocorrelation
//!
//! The system measures how strongly an image's edges line up with shifted
//! copies of themselves, picks the fundamental period of each axis with
//! harmonic-aware peak analysis, and renders matching grid overlays.

#![forbid(unsafe_code)]

/// Periodicity analysis and grid size estimation
pub mod analysis;
/// Input/output operations, rendering and error handling
pub mod io;
/// Mathematical utilities for sub-pixel peak refinement
pub mod math;
/// Raster image access, derived fields and synthetic patterns
pub mod raster;

pub use analysis::estimator::{
    DetectionStatus, EstimationResult, EstimatorConfig, GridOffset, GridPeriodEstimator, estimate,
};
pub use io::error::{GridError, Result};
pub use raster::{PixelBuffer, RasterImage};
