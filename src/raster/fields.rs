//! Luma and edge-energy fields derived from a raster image
//!
//! Both fields are `(height, width)` arrays recomputed on every estimate;
//! nothing is cached between calls.

use crate::io::configuration::{LUMA_BLUE, LUMA_GREEN, LUMA_RED};
use crate::raster::view::RasterImage;
use ndarray::Array2;

/// Per-pixel luma of an image
#[derive(Debug, Clone, PartialEq)]
pub struct GrayscaleField {
    values: Array2<f64>,
}

impl GrayscaleField {
    /// Convert every pixel to `0.299 R + 0.587 G + 0.114 B`, ignoring alpha
    pub fn from_raster<R: RasterImage + ?Sized>(image: &R) -> Self {
        let (width, height) = (image.width(), image.height());
        let values = Array2::from_shape_fn((height, width), |(y, x)| {
            let [r, g, b, _] = image.pixel(x, y);
            LUMA_BLUE.mul_add(
                f64::from(b),
                LUMA_RED.mul_add(f64::from(r), LUMA_GREEN * f64::from(g)),
            )
        });

        Self { values }
    }

    /// Underlying `(height, width)` array
    pub const fn values(&self) -> &Array2<f64> {
        &self.values
    }
}

/// Local intensity change per pixel
///
/// Pixel art has hard one-pixel color boundaries, so plain forward
/// differences localize cell edges better than a smoothing operator would.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeField {
    values: Array2<f64>,
}

impl EdgeField {
    /// Sum of absolute right and down neighbor differences
    ///
    /// The last row and column have no forward neighbors and stay at zero.
    pub fn from_grayscale(gray: &GrayscaleField) -> Self {
        let luma = gray.values();
        let (height, width) = luma.dim();
        let mut values = Array2::zeros((height, width));

        for y in 0..height.saturating_sub(1) {
            for x in 0..width.saturating_sub(1) {
                let center = luma.get((y, x)).copied().unwrap_or(0.0);
                let right = luma.get((y, x + 1)).copied().unwrap_or(center);
                let down = luma.get((y + 1, x)).copied().unwrap_or(center);

                if let Some(edge) = values.get_mut((y, x)) {
                    *edge = (center - right).abs() + (center - down).abs();
                }
            }
        }

        Self { values }
    }

    /// Convenience for `from_grayscale(&GrayscaleField::from_raster(image))`
    pub fn from_raster<R: RasterImage + ?Sized>(image: &R) -> Self {
        Self::from_grayscale(&GrayscaleField::from_raster(image))
    }

    /// Underlying `(height, width)` array
    pub const fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Field width in pixels
    pub fn width(&self) -> usize {
        self.values.ncols()
    }

    /// Field height in pixels
    pub fn height(&self) -> usize {
        self.values.nrows()
    }
}
