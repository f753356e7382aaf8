//! Parabolic sub-sample peak refinement
//!
//! Fits a parabola through a sample and its two neighbors and returns the
//! location of its vertex relative to the center sample.

/// Vertex offset of the parabola through `(-1, left)`, `(0, center)`, `(1, right)`
///
/// Returns `None` when the parabola is not concave (the center is not a
/// maximum) or when the vertex lies more than `max_offset` samples away.
pub fn parabolic_peak_offset(left: f64, center: f64, right: f64, max_offset: f64) -> Option<f64> {
    let denominator = 2.0 * center.mul_add(-2.0, left + right);
    if denominator.is_nan() || denominator >= 0.0 {
        return None;
    }

    let offset = (left - right) / denominator;
    (offset.is_finite() && offset.abs() <= max_offset).then_some(offset)
}

/// Refined position of the peak at `index` in `values`
///
/// Falls back to the integer index when the peak sits on the border of
/// `values` or the parabolic fit is rejected.
pub fn refine_peak(values: &[f64], index: usize, max_offset: f64) -> f64 {
    let position = index as f64;
    if index == 0 {
        return position;
    }

    let neighborhood = values.get(index - 1..=index + 1);
    match neighborhood {
        Some(&[left, center, right]) => parabolic_peak_offset(left, center, right, max_offset)
            .map_or(position, |offset| position + offset),
        _ => position,
    }
}
