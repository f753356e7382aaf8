//! Grid line rendering over the source image

use crate::analysis::estimator::GridOffset;
use crate::io::configuration::{DEFAULT_ZOOM, GRID_LINE_COLOR, MAX_ZOOM, MIN_ZOOM};
use crate::io::error::{GridError, Result, invalid_parameter};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

/// How grid lines are laid over an image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOverlay {
    /// Cell size in source pixels
    pub size: f64,
    /// Position of the first grid line in source pixels
    pub offset: GridOffset,
    /// Output scale factor; the source is upscaled without smoothing
    pub zoom: f64,
    /// Line color, alpha-blended over the image
    pub color: [u8; 4],
}

impl GridOverlay {
    /// Overlay with default zoom and line color
    pub fn new(size: f64) -> Self {
        Self {
            size,
            offset: GridOffset::default(),
            zoom: DEFAULT_ZOOM,
            color: GRID_LINE_COLOR,
        }
    }

    /// Same overlay at a different zoom
    #[must_use]
    pub const fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Same overlay starting at a different offset
    #[must_use]
    pub const fn with_offset(mut self, offset: GridOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Check size and zoom
    ///
    /// # Errors
    ///
    /// Returns an error if the size is not a positive finite number or the
    /// zoom is outside the supported range
    pub fn validate(&self) -> Result<()> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(invalid_parameter("size", &self.size, &"must be positive"));
        }
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.zoom) {
            return Err(invalid_parameter(
                "zoom",
                &self.zoom,
                &format!("must be between {MIN_ZOOM} and {MAX_ZOOM}"),
            ));
        }
        Ok(())
    }

    /// Draw the grid over a (possibly zoomed) copy of `image`
    ///
    /// A grid line at source position `p` covers source pixel `p - 1`, so the
    /// line at the origin falls outside the image. Lines are blended one at a
    /// time, which darkens intersections twice.
    ///
    /// # Errors
    ///
    /// Returns an error if the overlay parameters are invalid or the image
    /// has no pixels
    pub fn render(&self, image: &RgbaImage) -> Result<RgbaImage> {
        self.validate()?;

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(GridError::InvalidSourceData {
                reason: "cannot draw a grid over an empty image".to_string(),
            });
        }

        let scaled_width = scaled_extent(width, self.zoom);
        let scaled_height = scaled_extent(height, self.zoom);
        let mut canvas = if (scaled_width, scaled_height) == (width, height) {
            image.clone()
        } else {
            imageops::resize(image, scaled_width, scaled_height, FilterType::Nearest)
        };

        let color = Rgba(self.color);
        for position in line_positions(f64::from(width), self.size, f64::from(self.offset.x)) {
            let (start, end) = self.band(position, scaled_width);
            for x in start..end {
                for y in 0..scaled_height {
                    blend_pixel(&mut canvas, x, y, color);
                }
            }
        }
        for position in line_positions(f64::from(height), self.size, f64::from(self.offset.y)) {
            let (start, end) = self.band(position, scaled_height);
            for y in start..end {
                for x in 0..scaled_width {
                    blend_pixel(&mut canvas, x, y, color);
                }
            }
        }

        Ok(canvas)
    }

    // Output pixel range covered by the line at source `position`
    fn band(&self, position: f64, limit: u32) -> (u32, u32) {
        let start = ((position - 1.0) * self.zoom).round();
        let end = (position * self.zoom).round().max(start + 1.0);
        if end <= 0.0 {
            return (0, 0);
        }
        let clamp = |v: f64| v.clamp(0.0, f64::from(limit)) as u32;
        (clamp(start), clamp(end))
    }
}

/// Grid line positions `offset + k * size` below `extent`
///
/// Returns nothing for a non-positive or non-finite size.
pub fn line_positions(extent: f64, size: f64, offset: f64) -> Vec<f64> {
    if !(size.is_finite() && size > 0.0) {
        return Vec::new();
    }

    let mut positions = Vec::new();
    let mut step = 0.0_f64;
    loop {
        let position = step.mul_add(size, offset);
        if position >= extent {
            break;
        }
        positions.push(position);
        step += 1.0;
    }
    positions
}

fn scaled_extent(extent: u32, zoom: f64) -> u32 {
    (f64::from(extent) * zoom).round().max(1.0) as u32
}

// Source-over compositing of `color` onto the pixel at (x, y)
fn blend_pixel(canvas: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>) {
    let Some(pixel) = canvas.get_pixel_mut_checked(x, y) else {
        return;
    };

    let alpha = f64::from(color.0[3]) / 255.0;
    let [r, g, b, a] = pixel.0;
    let mix = |dst: u8, src: u8| {
        alpha
            .mul_add(f64::from(src), (1.0 - alpha) * f64::from(dst))
            .round()
            .clamp(0.0, 255.0) as u8
    };
    let out_alpha = (alpha * 255.0 + (1.0 - alpha) * f64::from(a))
        .round()
        .clamp(0.0, 255.0) as u8;

    *pixel = Rgba([
        mix(r, color.0[0]),
        mix(g, color.0[1]),
        mix(b, color.0[2]),
        out_alpha,
    ]);
}
