//! Synthetic periodic images with known grid sizes

use crate::raster::view::{PixelBuffer, RasterImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Axis along which a one-dimensional pattern varies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripeAxis {
    /// Cells change along x; every row is identical
    Columns,
    /// Cells change along y; every column is identical
    Rows,
}

/// Opaque gray RGBA value
pub const fn gray(level: u8) -> [u8; 4] {
    [level, level, level, 255]
}

/// Image filled with a single color
pub fn uniform(width: usize, height: usize, color: [u8; 4]) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |_, _| color)
}

/// Two-color checkerboard with `cell_width` x `cell_height` cells
///
/// A zero cell dimension is treated as one pixel.
pub fn checkerboard(
    width: usize,
    height: usize,
    cell_width: usize,
    cell_height: usize,
    colors: [[u8; 4]; 2],
) -> PixelBuffer {
    let cell_width = cell_width.max(1);
    let cell_height = cell_height.max(1);
    let [even, odd] = colors;

    PixelBuffer::from_fn(width, height, |x, y| {
        if (x / cell_width + y / cell_height).is_multiple_of(2) {
            even
        } else {
            odd
        }
    })
}

/// Stripes of `cell` pixels cycling through gray `levels` along one axis
///
/// Uneven steps between consecutive levels give some cell boundaries more
/// contrast than others, which produces strong correlation peaks at
/// multiples of the cell size.
pub fn stripes(
    width: usize,
    height: usize,
    cell: usize,
    levels: &[u8],
    axis: StripeAxis,
) -> PixelBuffer {
    let cell = cell.max(1);

    PixelBuffer::from_fn(width, height, |x, y| {
        let position = match axis {
            StripeAxis::Columns => x,
            StripeAxis::Rows => y,
        };
        let level = if levels.is_empty() {
            0
        } else {
            levels
                .get((position / cell) % levels.len())
                .copied()
                .unwrap_or(0)
        };
        gray(level)
    })
}

/// Copy of `image` with uniform noise in `[-amplitude, amplitude]` added to
/// each color channel
///
/// Alpha is left untouched. The same seed always produces the same image.
pub fn with_noise<R: RasterImage + ?Sized>(image: &R, amplitude: u8, seed: u64) -> PixelBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    let amplitude = i16::from(amplitude);

    PixelBuffer::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.pixel(x, y);
        let mut jitter = |channel: u8| {
            let delta = if amplitude == 0 {
                0
            } else {
                rng.random_range(-amplitude..=amplitude)
            };
            (i16::from(channel) + delta).clamp(0, 255) as u8
        };
        [jitter(r), jitter(g), jitter(b), a]
    })
}
