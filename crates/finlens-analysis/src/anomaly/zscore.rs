//! Single-pass population z-score screening.
//!
//! Mean and deviation are taken over the whole column, then every value
//! whose |z| strictly exceeds the threshold is flagged.

use crate::stats;

/// One value beyond the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZScoreOutlier {
    pub index: usize,
    pub value: f64,
    pub z_score: f64,
}

/// Flag values whose |z| exceeds `threshold`.
///
/// A constant column (σ = 0) has no outliers; nothing is divided by zero.
pub fn detect(values: &[f64], threshold: f64) -> Vec<ZScoreOutlier> {
    if values.len() < 2 || stats::is_constant(values) {
        return Vec::new();
    }

    // z is scale-invariant; work on the unit column so no deviation overflows.
    let (_, unit) = stats::rescaled(values);
    let mean = stats::mean(&unit);
    let stddev = stats::population_std(&unit);
    if stddev <= 0.0 || !stddev.is_finite() {
        return Vec::new();
    }

    values
        .iter()
        .zip(&unit)
        .enumerate()
        .filter_map(|(index, (&value, &scaled))| {
            let z_score = (scaled - mean) / stddev;
            (z_score.abs() > threshold).then_some(ZScoreOutlier {
                index,
                value,
                z_score,
            })
        })
        .collect()
}
