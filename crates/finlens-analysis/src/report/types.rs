//! The assembled report.

use finlens_core::config::AnomalyScope;
use finlens_core::types::{DatasetFilter, MetricName};
use serde::Serialize;

use crate::aggregation::{AggregationResult, GroupKey, MetricSummary};
use crate::anomaly::AnomalySet;
use crate::correlation::CorrelationMatrix;

/// One entry of a top-N ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedGroup {
    pub key: GroupKey,
    pub value: f64,
}

/// All descriptive analytics for one dataset snapshot.
///
/// Built in one pass by [`ReportAssembler`](super::ReportAssembler) and
/// never mutated afterwards. Serializes to JSON for presentation layers;
/// NaN sentinels serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Records in the analysed snapshot.
    pub record_count: usize,
    /// Filter the snapshot was derived with, if any.
    pub filter: Option<DatasetFilter>,
    /// Snapshot anomaly detection ran on.
    pub anomaly_scope: AnomalyScope,
    /// Mean per year of the trend metrics.
    pub yearly_trends: AggregationResult,
    /// Mean per calendar month of the seasonality metrics.
    pub seasonality: AggregationResult,
    /// Mean and sample std per department of the department metrics.
    pub departments: AggregationResult,
    /// Metric the department ranking is ordered by.
    pub top_metric: MetricName,
    /// Departments ranked by mean `top_metric`, highest first.
    pub top_departments: Vec<RankedGroup>,
    pub correlations: CorrelationMatrix,
    pub anomalies: AnomalySet,
    /// Descriptive summary of the correlation metrics.
    pub summary: Vec<MetricSummary>,
}

impl Report {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
