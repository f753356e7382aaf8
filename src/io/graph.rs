//! Diagnostic plots of correlation profiles

use crate::io::configuration::{
    GRAPH_BACKGROUND, GRAPH_HEIGHT, GRAPH_LINE_COLOR, GRAPH_LINE_WIDTH, GRAPH_PADDING,
    GRAPH_PEAK_COLOR, GRAPH_WIDTH,
};
use image::{Rgba, RgbaImage};

/// Canvas layout for a correlation plot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationGraph {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Blank border on every side of the plot area
    pub padding: u32,
}

impl Default for CorrelationGraph {
    fn default() -> Self {
        Self {
            width: GRAPH_WIDTH,
            height: GRAPH_HEIGHT,
            padding: GRAPH_PADDING,
        }
    }
}

impl CorrelationGraph {
    /// Plot `values` as a polyline with an optional marker at `peak`
    ///
    /// The curve is scaled so its maximum touches the top of the plot area.
    /// Profiles with fewer than two samples or no positive value render as
    /// an empty canvas. The marker is drawn only when `peak` lies inside the
    /// profile.
    pub fn render(&self, values: &[f64], peak: Option<f64>) -> RgbaImage {
        let mut canvas = RgbaImage::from_pixel(self.width, self.height, Rgba(GRAPH_BACKGROUND));

        let max = values.iter().copied().fold(0.0, f64::max);
        if values.len() < 2 || max <= 0.0 {
            return canvas;
        }

        let left = f64::from(self.padding);
        let top = f64::from(self.padding);
        let bottom = f64::from(self.height) - f64::from(self.padding);
        let plot_width = f64::from(self.width.saturating_sub(2 * self.padding));
        let plot_height = f64::from(self.height.saturating_sub(2 * self.padding));

        let x_scale = plot_width / (values.len() - 1) as f64;
        let y_scale = plot_height / max;

        let points: Vec<(f64, f64)> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (x_scale.mul_add(i as f64, left), v.mul_add(-y_scale, bottom)))
            .collect();

        let line = Rgba(GRAPH_LINE_COLOR);
        for pair in points.windows(2) {
            if let [from, to] = pair {
                draw_segment(&mut canvas, *from, *to, GRAPH_LINE_WIDTH, line);
            }
        }

        if let Some(peak) = peak.filter(|&p| p >= 0.0 && p < values.len() as f64) {
            let x = x_scale.mul_add(peak, left);
            draw_segment(
                &mut canvas,
                (x, top),
                (x, bottom),
                1,
                Rgba(GRAPH_PEAK_COLOR),
            );
        }

        canvas
    }
}

// Stamp a square brush of `thickness` pixels along the segment
fn draw_segment(
    canvas: &mut RgbaImage,
    from: (f64, f64),
    to: (f64, f64),
    thickness: u32,
    color: Rgba<u8>,
) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;
    let thickness = thickness.max(1);
    let reach = i64::from(thickness / 2);

    for step in 0..=steps {
        let t = f64::from(step) / f64::from(steps);
        let cx = dx.mul_add(t, from.0).round() as i64;
        let cy = dy.mul_add(t, from.1).round() as i64;

        for oy in 0..i64::from(thickness) {
            for ox in 0..i64::from(thickness) {
                let (px, py) = (cx + ox - reach, cy + oy - reach);
                if let (Ok(px), Ok(py)) = (u32::try_from(px), u32::try_from(py))
                    && let Some(pixel) = canvas.get_pixel_mut_checked(px, py)
                {
                    *pixel = color;
                }
            }
        }
    }
}
