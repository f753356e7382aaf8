//! Period extraction from a normalized correlation profile
//!
//! A periodic pattern of cell size `P` correlates with itself at `P`, `2P`,
//! `3P` and so on. The strongest of those peaks is often a harmonic rather
//! than the fundamental, so the search anchors on the lowest qualifying peak
//! and back-projects every harmonic onto it, weighting by peak strength.
//! A plain strongest-peak search remains as the fallback.

use crate::io::configuration::{
    DEFAULT_MAX_GRID_SIZE, DEFAULT_MIN_GRID_SIZE, DEFAULT_PEAK_THRESHOLD, FALLBACK_SEARCH_FACTOR,
    HARMONIC_TOLERANCE, MAX_SUBPIXEL_OFFSET,
};
use crate::math::subpixel::refine_peak;

/// Strict local maximum of a profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakCandidate {
    /// Shift at which the maximum occurs
    pub index: usize,
    /// Normalized correlation at `index`
    pub value: f64,
}

/// Search window and tolerances for one peak search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakSearch {
    /// Smallest shift considered
    pub min_size: f64,
    /// Largest expected period; bounds the fallback window
    pub max_size: f64,
    /// Candidates must exceed this normalized correlation
    pub threshold: f64,
    /// Accepted deviation of `index / base` from an integer
    pub harmonic_tolerance: f64,
    /// Largest sub-sample refinement accepted
    pub max_subpixel_offset: f64,
    /// Fallback scans up to `max_size * fallback_search_factor`
    pub fallback_search_factor: f64,
}

impl Default for PeakSearch {
    fn default() -> Self {
        Self {
            min_size: f64::from(DEFAULT_MIN_GRID_SIZE),
            max_size: f64::from(DEFAULT_MAX_GRID_SIZE),
            threshold: DEFAULT_PEAK_THRESHOLD,
            harmonic_tolerance: HARMONIC_TOLERANCE,
            max_subpixel_offset: MAX_SUBPIXEL_OFFSET,
            fallback_search_factor: FALLBACK_SEARCH_FACTOR,
        }
    }
}

impl PeakSearch {
    // First shift with both neighbors inside the profile
    fn first_index(&self) -> usize {
        (self.min_size.ceil().max(1.0)) as usize
    }

    // Exclusive end of the fallback window
    fn fallback_limit(&self, len: usize) -> usize {
        let scaled = (self.max_size * self.fallback_search_factor).ceil().max(0.0) as usize;
        len.saturating_sub(1).min(scaled)
    }
}

/// Whether `values[index]` is strictly greater than both neighbors
pub fn is_local_maximum(values: &[f64], index: usize) -> bool {
    if index == 0 {
        return false;
    }
    match values.get(index - 1..=index + 1) {
        Some(&[left, center, right]) => center > left && center > right,
        _ => false,
    }
}

/// Local maxima from `min_size` upward that exceed the threshold, in index order
pub fn collect_candidates(values: &[f64], search: &PeakSearch) -> Vec<PeakCandidate> {
    let end = values.len().saturating_sub(1);

    (search.first_index()..end)
        .filter(|&index| is_local_maximum(values, index))
        .filter_map(|index| {
            let value = values.get(index).copied()?;
            (value > search.threshold).then_some(PeakCandidate { index, value })
        })
        .collect()
}

/// Weighted mean of the fundamental periods implied by each harmonic
///
/// The first candidate is taken as the base period. Every candidate whose
/// index lies within `harmonic_tolerance` of an integer multiple `n` of the
/// base contributes `refined_index / n`, weighted by its correlation.
/// Returns `None` when no candidate qualifies or all weights are zero.
pub fn find_harmonic_weighted_period(
    values: &[f64],
    candidates: &[PeakCandidate],
    search: &PeakSearch,
) -> Option<f64> {
    let base = candidates.first()?.index as f64;

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for candidate in candidates {
        let ratio = candidate.index as f64 / base;
        let harmonic = ratio.round();

        if harmonic > 0.0 && (ratio - harmonic).abs() < search.harmonic_tolerance {
            let refined = refine_peak(values, candidate.index, search.max_subpixel_offset);
            let period = refined / harmonic;
            weighted_sum = period.mul_add(candidate.value, weighted_sum);
            total_weight += candidate.value;
        }
    }

    (total_weight > 0.0).then(|| weighted_sum / total_weight)
}

/// Highest local maximum in the fallback window, refined to sub-sample precision
///
/// The window runs from `min_size` up to, but excluding,
/// `min(len - 1, ceil(max_size * fallback_search_factor))`. Only peaks with
/// positive correlation qualify.
pub fn find_strongest_peak_with_subpixel(values: &[f64], search: &PeakSearch) -> Option<f64> {
    let mut best: Option<PeakCandidate> = None;

    for index in search.first_index()..search.fallback_limit(values.len()) {
        if !is_local_maximum(values, index) {
            continue;
        }
        let value = values.get(index).copied().unwrap_or(0.0);
        let best_value = best.map_or(0.0, |peak| peak.value);
        if value > best_value {
            best = Some(PeakCandidate { index, value });
        }
    }

    best.map(|peak| refine_peak(values, peak.index, search.max_subpixel_offset))
}

/// Fundamental period of a normalized profile, if any
///
/// Tries the harmonic-weighted estimate first and falls back to the
/// strongest peak in range.
pub fn find_peak(values: &[f64], search: &PeakSearch) -> Option<f64> {
    let max = values.iter().copied().fold(0.0, f64::max);
    if values.len() < 3 || max <= 0.0 {
        return None;
    }

    let candidates = collect_candidates(values, search);
    find_harmonic_weighted_period(values, &candidates, search)
        .or_else(|| find_strongest_peak_with_subpixel(values, search))
}
