//! Report analysis configuration.

use serde::{Deserialize, Serialize};

use crate::types::MetricName;

/// Which snapshot anomaly detection runs on when a report is filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyScope {
    /// Same filtered snapshot as every other analysis.
    #[default]
    Filtered,
    /// The full, unfiltered dataset.
    Full,
}

impl AnomalyScope {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "filtered" => Some(Self::Filtered),
            "full" => Some(Self::Full),
            _ => None,
        }
    }
}

/// Configuration for the report assembler.
///
/// Empty metric lists fall back to the compiled defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Z-score threshold for anomaly detection. Default: 3.0.
    pub anomaly_threshold: Option<f64>,
    /// Snapshot anomaly detection runs on. Default: filtered.
    pub anomaly_scope: Option<AnomalyScope>,
    /// Length of the department ranking. Default: 10.
    pub top_n: Option<usize>,
    /// Metric the department ranking is ordered by. Default: Revenue.
    pub top_metric: Option<MetricName>,
    /// Metrics averaged per year.
    pub trend_metrics: Vec<MetricName>,
    /// Metrics averaged per calendar month.
    pub seasonality_metrics: Vec<MetricName>,
    /// Metrics reduced (mean and std) per department.
    pub department_metrics: Vec<MetricName>,
    /// Metrics included in the correlation matrix.
    pub correlation_metrics: Vec<MetricName>,
    /// Metrics screened for anomalies.
    pub anomaly_metrics: Vec<MetricName>,
}

impl AnalysisConfig {
    pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 3.0;
    pub const DEFAULT_TOP_N: usize = 10;

    pub fn effective_anomaly_threshold(&self) -> f64 {
        self.anomaly_threshold.unwrap_or(Self::DEFAULT_ANOMALY_THRESHOLD)
    }

    pub fn effective_anomaly_scope(&self) -> AnomalyScope {
        self.anomaly_scope.unwrap_or_default()
    }

    pub fn effective_top_n(&self) -> usize {
        self.top_n.unwrap_or(Self::DEFAULT_TOP_N)
    }

    pub fn effective_top_metric(&self) -> MetricName {
        self.top_metric.unwrap_or(MetricName::Revenue)
    }

    pub fn effective_trend_metrics(&self) -> Vec<MetricName> {
        or_default(
            &self.trend_metrics,
            &[
                MetricName::Revenue,
                MetricName::NetProfit,
                MetricName::SalesMargin,
                MetricName::MarketShare,
            ],
        )
    }

    pub fn effective_seasonality_metrics(&self) -> Vec<MetricName> {
        or_default(&self.seasonality_metrics, &[MetricName::Revenue, MetricName::NetProfit])
    }

    pub fn effective_department_metrics(&self) -> Vec<MetricName> {
        or_default(
            &self.department_metrics,
            &[MetricName::Revenue, MetricName::SalesMargin, MetricName::MarketShare],
        )
    }

    pub fn effective_correlation_metrics(&self) -> Vec<MetricName> {
        or_default(&self.correlation_metrics, &MetricName::ALL)
    }

    pub fn effective_anomaly_metrics(&self) -> Vec<MetricName> {
        or_default(
            &self.anomaly_metrics,
            &[MetricName::Revenue, MetricName::NetProfit, MetricName::SalesMargin],
        )
    }
}

fn or_default(configured: &[MetricName], default: &[MetricName]) -> Vec<MetricName> {
    if configured.is_empty() {
        default.to_vec()
    } else {
        configured.to_vec()
    }
}
