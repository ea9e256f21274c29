//! Historical growth estimation and compound extrapolation.

use finlens_core::errors::{AnalysisError, AnalysisResult};
use finlens_core::types::{Dataset, MetricName};
use serde::Serialize;

use crate::aggregation::{aggregate, GroupBy, GroupKey, Reducer};
use crate::stats;

/// Growth rate chosen for an extrapolation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrowthEstimate {
    /// Mean period-over-period change of the yearly means.
    pub candidate: f64,
    /// Rate actually applied: the candidate, or the fallback.
    pub applied: f64,
    /// Whether the guard rail replaced the candidate.
    pub fell_back: bool,
}

/// Mean of `metric` per year, chronological.
pub fn yearly_means(dataset: &Dataset, metric: MetricName) -> AnalysisResult<Vec<(i32, f64)>> {
    let by_year = aggregate(dataset, GroupBy::Year, &[metric], &[Reducer::Mean])?;
    by_year
        .groups
        .iter()
        .map(|g| match (&g.key, g.metrics.get(&metric).and_then(|v| v.mean)) {
            (GroupKey::Year(year), Some(mean)) => Ok((*year, mean)),
            _ => Err(AnalysisError::InvalidSchema(format!(
                "no yearly mean for {metric} in group {}",
                g.key
            ))),
        })
        .collect()
}

/// Fractional change between each consecutive pair of values.
pub fn period_changes(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect()
}

/// Average the period-over-period changes of `means` and apply the guard
/// rail: a candidate below `bounds.0`, above `bounds.1`, or not finite
/// (a zero mean in the history) is replaced by `fallback`.
///
/// Callers ensure at least two means.
pub fn estimate_growth(means: &[f64], fallback: f64, bounds: (f64, f64)) -> GrowthEstimate {
    let candidate = stats::mean(&period_changes(means));
    let (min, max) = bounds;
    let in_bounds = candidate.is_finite() && candidate >= min && candidate <= max;
    GrowthEstimate {
        candidate,
        applied: if in_bounds { candidate } else { fallback },
        fell_back: !in_bounds,
    }
}

/// The `years_ahead` years following `last_year`, ascending.
///
/// Fails rather than wrapping when the horizon does not fit in an `i32`
/// year.
pub fn horizon(last_year: i32, years_ahead: u32) -> AnalysisResult<Vec<i32>> {
    let steps = i32::try_from(years_ahead).map_err(|_| {
        AnalysisError::invalid_parameter(
            "years_ahead",
            format!("{years_ahead} exceeds the largest horizon {}", i32::MAX),
        )
    })?;
    if last_year.checked_add(steps).is_none() {
        return Err(AnalysisError::invalid_parameter(
            "years_ahead",
            format!("{steps} years after {last_year} overflows the year range"),
        ));
    }
    Ok((1..=steps).map(|step| last_year + step).collect())
}

/// Compound `last_value` forward by `growth` for `years_ahead` years
/// starting the year after `last_year`.
pub fn extrapolate(
    last_year: i32,
    last_value: f64,
    growth: f64,
    years_ahead: u32,
) -> AnalysisResult<Vec<(i32, f64)>> {
    let mut value = last_value;
    Ok(horizon(last_year, years_ahead)?
        .into_iter()
        .map(|year| {
            value *= 1.0 + growth;
            (year, value)
        })
        .collect())
}
