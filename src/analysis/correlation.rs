//! Edge autocorrelation profiles along one image axis

use crate::raster::fields::EdgeField;
use ndarray::{Slice, Zip};
use std::fmt;

/// Direction in which the edge field is shifted against itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Shift along x; detects column spacing
    Horizontal,
    /// Shift along y; detects row spacing
    Vertical,
}

impl Axis {
    /// Both axes in evaluation order
    pub const ALL: [Self; 2] = [Self::Horizontal, Self::Vertical];

    /// Number of samples along this axis of the field
    pub fn extent(self, edges: &EdgeField) -> usize {
        match self {
            Self::Horizontal => edges.width(),
            Self::Vertical => edges.height(),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "x"),
            Self::Vertical => write!(f, "y"),
        }
    }
}

/// Autocorrelation of an edge field indexed by integer shift
///
/// A field `L` samples long along the axis gives `floor(L / 2)` entries.
/// Entry 0 is never evaluated and stays zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationProfile {
    axis: Axis,
    values: Vec<f64>,
}

impl CorrelationProfile {
    /// Raw sum of `edge(p) * edge(p + shift)` for every shift
    ///
    /// Runs in `O(L^2 * M)` for an axis of length `L` and orthogonal extent `M`.
    pub fn compute(edges: &EdgeField, axis: Axis) -> Self {
        let max_shift = axis.extent(edges) / 2;
        let mut values = vec![0.0; max_shift];

        for shift in 1..max_shift {
            if let Some(value) = values.get_mut(shift) {
                *value = shifted_product_sum(edges, axis, shift);
            }
        }

        Self { axis, values }
    }

    /// Build a profile from precomputed values
    pub const fn from_values(axis: Axis, values: Vec<f64>) -> Self {
        Self { axis, values }
    }

    /// Scale so the largest entry becomes 1.0
    ///
    /// Profiles whose maximum is not positive carry no periodicity and are
    /// returned unchanged.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let max = self.max_value();
        if max > 0.0 {
            for value in &mut self.values {
                *value /= max;
            }
        }
        self
    }

    /// Axis this profile was computed along
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Correlation values indexed by shift
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at `shift`, if inside the profile
    pub fn get(&self, shift: usize) -> Option<f64> {
        self.values.get(shift).copied()
    }

    /// Number of entries, including the unused shift 0
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the profile has no entries
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest entry, or 0.0 for an empty profile
    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

}

// Overlap of the field with itself displaced by `shift` along `axis`
fn shifted_product_sum(edges: &EdgeField, axis: Axis, shift: usize) -> f64 {
    let field = edges.values();
    let extent = axis.extent(edges);
    if shift >= extent {
        return 0.0;
    }

    let array_axis = match axis {
        Axis::Horizontal => ndarray::Axis(1),
        Axis::Vertical => ndarray::Axis(0),
    };
    let base = field.slice_axis(array_axis, Slice::from(..extent - shift));
    let displaced = field.slice_axis(array_axis, Slice::from(shift..));

    Zip::from(&base)
        .and(&displaced)
        .fold(0.0, |acc, &a, &b| a.mul_add(b, acc))
}
