//! Mathematical utilities for peak refinement

/// Parabolic sub-sample peak interpolation
pub mod subpixel;
