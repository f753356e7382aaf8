//! Grid cell size estimation from edge autocorrelation
//!
//! The estimator converts the image to luma, measures edge energy, correlates
//! the edge field with shifted copies of itself along each axis and extracts
//! the fundamental period of each profile. The two axis periods are averaged
//! into a single square cell size.
//!
//! Failing to find a grid is a regular outcome, reported through
//! [`EstimationResult::status`] rather than an error.

use crate::analysis::correlation::{Axis, CorrelationProfile};
use crate::analysis::peaks::{PeakSearch, find_peak};
use crate::io::configuration::{
    DEFAULT_MAX_GRID_SIZE, DEFAULT_MIN_GRID_SIZE, DEFAULT_PEAK_THRESHOLD, FALLBACK_SEARCH_FACTOR,
    HARMONIC_TOLERANCE, MAX_SUBPIXEL_OFFSET,
};
use crate::io::error::{Result, invalid_parameter};
use crate::raster::fields::EdgeField;
use crate::raster::view::RasterImage;
use tracing::{debug, warn};

/// Tunable parameters of the estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorConfig {
    /// Smallest accepted cell size in pixels
    pub min_grid_size: u32,
    /// Largest accepted cell size in pixels
    pub max_grid_size: u32,
    /// Normalized correlation a peak must exceed to count as a candidate
    pub peak_threshold: f64,
    /// Accepted deviation of a candidate from an integer harmonic
    pub harmonic_tolerance: f64,
    /// Largest parabolic sub-pixel shift accepted
    pub max_subpixel_offset: f64,
    /// Fallback window reaches `max_grid_size` times this factor
    pub fallback_search_factor: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            min_grid_size: DEFAULT_MIN_GRID_SIZE,
            max_grid_size: DEFAULT_MAX_GRID_SIZE,
            peak_threshold: DEFAULT_PEAK_THRESHOLD,
            harmonic_tolerance: HARMONIC_TOLERANCE,
            max_subpixel_offset: MAX_SUBPIXEL_OFFSET,
            fallback_search_factor: FALLBACK_SEARCH_FACTOR,
        }
    }
}

impl EstimatorConfig {
    /// Check every parameter against its valid range
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `min_grid_size` is zero or exceeds `max_grid_size`
    /// - `peak_threshold` is not finite
    /// - `harmonic_tolerance` is outside `(0, 0.5]`
    /// - `max_subpixel_offset` is not positive
    /// - `fallback_search_factor` is below 1
    pub fn validate(&self) -> Result<()> {
        if self.min_grid_size == 0 {
            return Err(invalid_parameter(
                "min_grid_size",
                &self.min_grid_size,
                &"must be at least 1",
            ));
        }
        if self.max_grid_size < self.min_grid_size {
            return Err(invalid_parameter(
                "max_grid_size",
                &self.max_grid_size,
                &format!("must not be below min_grid_size ({})", self.min_grid_size),
            ));
        }
        if !self.peak_threshold.is_finite() {
            return Err(invalid_parameter(
                "peak_threshold",
                &self.peak_threshold,
                &"must be finite",
            ));
        }
        if !(self.harmonic_tolerance > 0.0 && self.harmonic_tolerance <= 0.5) {
            return Err(invalid_parameter(
                "harmonic_tolerance",
                &self.harmonic_tolerance,
                &"must be in (0, 0.5]",
            ));
        }
        if !(self.max_subpixel_offset > 0.0 && self.max_subpixel_offset.is_finite()) {
            return Err(invalid_parameter(
                "max_subpixel_offset",
                &self.max_subpixel_offset,
                &"must be positive",
            ));
        }
        if !(self.fallback_search_factor >= 1.0 && self.fallback_search_factor.is_finite()) {
            return Err(invalid_parameter(
                "fallback_search_factor",
                &self.fallback_search_factor,
                &"must be at least 1",
            ));
        }
        Ok(())
    }

    /// Peak search window derived from this configuration
    pub fn peak_search(&self) -> PeakSearch {
        PeakSearch {
            min_size: f64::from(self.min_grid_size),
            max_size: f64::from(self.max_grid_size),
            threshold: self.peak_threshold,
            harmonic_tolerance: self.harmonic_tolerance,
            max_subpixel_offset: self.max_subpixel_offset,
            fallback_search_factor: self.fallback_search_factor,
        }
    }
}

/// Where the overlay grid starts; always the image origin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridOffset {
    /// Horizontal offset in pixels
    pub x: u32,
    /// Vertical offset in pixels
    pub y: u32,
}

/// Outcome category of an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionStatus {
    /// A cell size inside the configured bounds was found
    Detected,
    /// Neither axis showed a periodic structure
    NoPeriodicity,
    /// A period was found but the combined size falls outside the bounds
    OutOfBounds,
}

/// Everything one estimate produces
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationResult {
    /// Combined cell size, or 0.0 when detection failed
    pub size: f64,
    /// Grid origin
    pub offset: GridOffset,
    /// Normalized horizontal profile
    pub corr_x: CorrelationProfile,
    /// Normalized vertical profile
    pub corr_y: CorrelationProfile,
    /// Horizontal period, if one was found
    pub size_x: Option<f64>,
    /// Vertical period, if one was found
    pub size_y: Option<f64>,
}

impl EstimationResult {
    /// Classify the result
    pub fn status(&self) -> DetectionStatus {
        if self.size > 0.0 {
            DetectionStatus::Detected
        } else if self.size_x.is_none() && self.size_y.is_none() {
            DetectionStatus::NoPeriodicity
        } else {
            DetectionStatus::OutOfBounds
        }
    }

    /// Whether a usable cell size was found
    pub fn is_detected(&self) -> bool {
        self.status() == DetectionStatus::Detected
    }

    /// Detected size, or `fallback` when detection failed
    pub fn size_or(&self, fallback: f64) -> f64 {
        if self.is_detected() {
            self.size
        } else {
            fallback
        }
    }

    /// Period found along `axis`
    pub const fn axis_size(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Horizontal => self.size_x,
            Axis::Vertical => self.size_y,
        }
    }

    /// Profile computed along `axis`
    pub const fn profile(&self, axis: Axis) -> &CorrelationProfile {
        match axis {
            Axis::Horizontal => &self.corr_x,
            Axis::Vertical => &self.corr_y,
        }
    }

    /// Human-readable period along `axis`, e.g. `period: 8.000px`
    pub fn axis_summary(&self, axis: Axis) -> String {
        self.axis_size(axis).map_or_else(
            || "period: not detected".to_string(),
            |size| format!("period: {size:.3}px"),
        )
    }
}

/// Estimates the repeating cell size of pixel art
#[derive(Debug, Clone, Default)]
pub struct GridPeriodEstimator {
    config: EstimatorConfig,
}

impl GridPeriodEstimator {
    /// Create an estimator with a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails [`EstimatorConfig::validate`]
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub const fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimate the grid cell size of `image`
    ///
    /// Deterministic for a given image and configuration; no state is kept
    /// between calls.
    pub fn estimate<R: RasterImage + ?Sized>(&self, image: &R) -> EstimationResult {
        let edges = EdgeField::from_raster(image);
        let search = self.config.peak_search();

        let corr_x = CorrelationProfile::compute(&edges, Axis::Horizontal).normalized();
        let corr_y = CorrelationProfile::compute(&edges, Axis::Vertical).normalized();

        let size_x = find_peak(corr_x.values(), &search);
        let size_y = find_peak(corr_y.values(), &search);
        debug!(?size_x, ?size_y, "axis periods");

        let size = self.combine(size_x, size_y);

        EstimationResult {
            size,
            offset: GridOffset::default(),
            corr_x,
            corr_y,
            size_x,
            size_y,
        }
    }

    // Average the axis periods and reject out-of-range results without clamping
    fn combine(&self, size_x: Option<f64>, size_y: Option<f64>) -> f64 {
        let combined = match (size_x, size_y) {
            (Some(x), Some(y)) => f64::midpoint(x, y),
            (Some(size), None) | (None, Some(size)) => size,
            (None, None) => {
                warn!("could not detect a periodic grid structure");
                return 0.0;
            }
        };

        let min = f64::from(self.config.min_grid_size);
        let max = f64::from(self.config.max_grid_size);
        if combined < min || combined > max {
            warn!(
                size = combined,
                min, max, "detected size is out of bounds"
            );
            return 0.0;
        }

        combined
    }
}

/// Estimate with the given bounds and threshold, other settings at their defaults
///
/// # Errors
///
/// Returns an error if the parameters fail [`EstimatorConfig::validate`]
pub fn estimate<R: RasterImage + ?Sized>(
    image: &R,
    max_grid_size: u32,
    peak_threshold: f64,
    min_grid_size: u32,
) -> Result<EstimationResult> {
    let estimator = GridPeriodEstimator::new(EstimatorConfig {
        min_grid_size,
        max_grid_size,
        peak_threshold,
        ..EstimatorConfig::default()
    })?;
    Ok(estimator.estimate(image))
}
