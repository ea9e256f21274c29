//! Whole-column descriptive statistics, one summary per metric.

use finlens_core::errors::AnalysisResult;
use finlens_core::types::{Dataset, MetricName};
use serde::Serialize;

use crate::stats;

/// Count, central tendency, spread and quartiles of one metric column.
///
/// Statistics that need data are NaN when `count` is zero; `std` is the
/// sample deviation and is NaN when `count < 2`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary {
    pub metric: MetricName,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Summarize each metric column of `dataset`, in the order given.
pub fn describe(dataset: &Dataset, metrics: &[MetricName]) -> AnalysisResult<Vec<MetricSummary>> {
    metrics
        .iter()
        .map(|&metric| {
            let mut values = dataset.column(metric)?;
            values.sort_by(f64::total_cmp);
            let (min, max) = stats::min_max(&values).unwrap_or((f64::NAN, f64::NAN));
            Ok(MetricSummary {
                metric,
                count: values.len(),
                mean: stats::mean(&values),
                std: stats::sample_std(&values),
                min,
                q25: stats::percentile(&values, 25.0),
                median: stats::percentile(&values, 50.0),
                q75: stats::percentile(&values, 75.0),
                max,
            })
        })
        .collect()
}
