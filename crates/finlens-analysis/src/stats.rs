//! Numeric helpers shared by the pipeline stages, via the `statrs` crate.
//!
//! Degenerate inputs return NaN rather than panicking: an empty slice has no
//! mean, fewer than two samples have no sample deviation, a constant column
//! has no correlation.

use statrs::statistics::Statistics;

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.mean()
}

/// Sample standard deviation (n - 1 denominator). NaN for fewer than two values.
pub fn sample_std(values: &[f64]) -> f64 {
    let (scale, unit) = rescaled(values);
    scale * unit.iter().std_dev()
}

/// Population standard deviation (n denominator). NaN for an empty slice.
pub fn population_std(values: &[f64]) -> f64 {
    let (scale, unit) = rescaled(values);
    scale * unit.iter().population_std_dev()
}

/// Divide every value by the largest magnitude in the slice.
///
/// Squared deviations of values near 1e160 overflow to infinity and those
/// near 1e-200 underflow to zero. Deviation and correlation are computed on
/// the rescaled column and scaled back, so any finite column gives a
/// finite result.
pub(crate) fn rescaled(values: &[f64]) -> (f64, Vec<f64>) {
    let scale = values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return (1.0, values.to_vec());
    }
    (scale, values.iter().map(|v| v / scale).collect())
}

/// `(min, max)` of the slice, or `None` when empty.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// Whether every value is identical. An empty slice counts as constant.
///
/// Checked exactly rather than through the variance, which roundoff can
/// leave slightly above zero for a constant column.
pub fn is_constant(values: &[f64]) -> bool {
    min_max(values).map_or(true, |(lo, hi)| lo == hi)
}

/// Percentile of an ascending-sorted slice using linear interpolation
/// between closest ranks. NaN for an empty slice.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let rank = (p / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let frac = rank - lower as f64;
            sorted[lower] * (1.0 - frac) + sorted[upper] * frac
        }
    }
}

/// Pearson correlation coefficient of two equal-length columns.
///
/// NaN when either column is constant or the lengths differ or fewer than
/// two points are given. Otherwise clamped to `[-1, 1]` to absorb roundoff.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 || is_constant(x) || is_constant(y) {
        return f64::NAN;
    }
    // Pearson is invariant under positive scaling of either column.
    let (_, x) = rescaled(x);
    let (_, y) = rescaled(y);
    let mx = mean(&x);
    let my = mean(&y);
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&a, &b) in x.iter().zip(&y) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    let denom = sxx.sqrt() * syy.sqrt();
    if denom <= 0.0 || !denom.is_finite() {
        return f64::NAN;
    }
    (sxy / denom).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_std_of_known_values() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&v) - 5.0).abs() < 1e-12);
        assert!((population_std(&v) - 2.0).abs() < 1e-12);
        assert!((sample_std(&v) - 2.138_089_935_299_395).abs() < 1e-9);
    }

    #[test]
    fn degenerate_inputs_are_nan() {
        assert!(mean(&[]).is_nan());
        assert!(sample_std(&[1.0]).is_nan());
        assert!(percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn percentile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!((percentile(&sorted, 50.0) - 2.5).abs() < 1e-12);
        assert!((percentile(&sorted, 25.0) - 1.75).abs() < 1e-12);
        assert_eq!(percentile(&sorted, 0.0), 1.0);
        assert_eq!(percentile(&sorted, 100.0), 4.0);
    }

    #[test]
    fn pearson_perfect_and_inverse() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        let z = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &z) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_constant_column_is_nan() {
        assert!(pearson(&[1.0, 2.0, 3.0], &[5.1, 5.1, 5.1]).is_nan());
    }

    #[test]
    fn pearson_survives_extreme_magnitudes() {
        let huge = [1e160, 2e160, 3e160];
        assert!((pearson(&huge, &huge) - 1.0).abs() < 1e-12);

        let tiny = [1e-200, 2e-200, 3e-200];
        let tiny_rev = [3e-200, 2e-200, 1e-200];
        assert!((pearson(&tiny, &tiny_rev) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn std_is_finite_for_extreme_magnitudes() {
        let sample = sample_std(&[1e160, 3e160]);
        assert!((sample / 1e160 - std::f64::consts::SQRT_2).abs() < 1e-12);

        let population = population_std(&[-1e200, 1e200]);
        assert!((population / 1e200 - 1.0).abs() < 1e-12);

        let tiny = population_std(&[1e-200, 3e-200]);
        assert!((tiny / 1e-200 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_detection_is_exact() {
        assert!(is_constant(&[0.1 + 0.2; 5]));
        assert!(!is_constant(&[1.0, 1.0 + f64::EPSILON]));
        assert!(is_constant(&[]));
    }
}
