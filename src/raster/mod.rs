//! Raster input handling
//!
//! This module contains pixel-level functionality including:
//! - The read-only image abstraction consumed by the estimator
//! - Luma and edge-energy fields
//! - Synthetic periodic test patterns

/// Luma and edge-energy fields
pub mod fields;
/// Synthetic patterns with known periods
pub mod pattern;
/// Read-only pixel access and owned pixel buffers
pub mod view;

pub use fields::{EdgeField, GrayscaleField};
pub use view::{PixelBuffer, RasterImage};
