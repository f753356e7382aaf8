//! Read-only pixel access for decoded images
//!
//! The estimator only ever sees a [`RasterImage`], so it can run headless on
//! in-memory buffers as well as on images decoded by the `image` crate.

use crate::io::error::{GridError, Result};
use image::RgbaImage;

/// Minimal pixel access needed by grid detection
pub trait RasterImage {
    /// Image width in pixels
    fn width(&self) -> usize;

    /// Image height in pixels
    fn height(&self) -> usize;

    /// RGBA value at `(x, y)`
    ///
    /// Callers keep `x < width()` and `y < height()`; out of range reads
    /// return transparent black.
    fn pixel(&self, x: usize, y: usize) -> [u8; 4];

    /// Whether the image has no pixels at all
    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

impl RasterImage for RgbaImage {
    fn width(&self) -> usize {
        self.dimensions().0 as usize
    }

    fn height(&self) -> usize {
        self.dimensions().1 as usize
    }

    fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return [0, 0, 0, 0];
        };
        self.get_pixel_checked(x, y).map_or([0, 0, 0, 0], |p| p.0)
    }
}

/// Owned row-major RGBA8 pixel buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is not exactly `width * height * 4` bytes long
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| GridError::InvalidSourceData {
                reason: format!("{width}x{height} image is too large"),
            })?;

        if data.len() != expected {
            return Err(GridError::InvalidSourceData {
                reason: format!(
                    "expected {expected} bytes for a {width}x{height} RGBA image, got {}",
                    data.len()
                ),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }

        Self {
            width,
            height,
            data,
        }
    }

    /// Convert into an `image` crate buffer for encoding
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions don't fit in `u32`
    pub fn into_rgba_image(self) -> Result<RgbaImage> {
        let width = u32::try_from(self.width).map_err(|e| GridError::InvalidSourceData {
            reason: format!("width {}: {e}", self.width),
        })?;
        let height = u32::try_from(self.height).map_err(|e| GridError::InvalidSourceData {
            reason: format!("height {}: {e}", self.height),
        })?;

        RgbaImage::from_raw(width, height, self.data).ok_or_else(|| GridError::InvalidSourceData {
            reason: "pixel buffer length does not match its dimensions".to_string(),
        })
    }
}

impl RasterImage for PixelBuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0, 0];
        }
        let start = (y * self.width + x) * 4;
        match self.data.get(start..start + 4) {
            Some(&[r, g, b, a]) => [r, g, b, a],
            _ => [0, 0, 0, 0],
        }
    }
}
