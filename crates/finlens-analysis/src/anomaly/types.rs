//! Anomaly detection result types.

use std::collections::BTreeMap;

use finlens_core::types::{MetricName, Record};
use serde::Serialize;

/// A record flagged under one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anomaly {
    /// Row index in the analysed dataset.
    pub index: usize,
    pub record: Record,
    pub value: f64,
    /// Signed z-score; its magnitude exceeded the threshold.
    pub z_score: f64,
}

/// Flagged records per metric, each list in dataset order.
///
/// Every screened metric has an entry, empty when nothing was flagged.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AnomalySet {
    pub threshold: f64,
    pub by_metric: BTreeMap<MetricName, Vec<Anomaly>>,
}

impl AnomalySet {
    /// Anomalies for `metric`; empty if the metric was not screened.
    pub fn for_metric(&self, metric: MetricName) -> &[Anomaly] {
        self.by_metric.get(&metric).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total flags across all metrics. A record flagged under two metrics
    /// counts twice.
    pub fn total(&self) -> usize {
        self.by_metric.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
