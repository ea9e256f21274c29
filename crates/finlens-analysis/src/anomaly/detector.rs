//! Per-metric anomaly detector.

use std::collections::BTreeMap;

use finlens_core::errors::{AnalysisError, AnalysisResult};
use finlens_core::types::{Dataset, MetricName};
use rayon::prelude::*;
use tracing::{debug, info};

use super::types::{Anomaly, AnomalySet};
use super::zscore;

/// Z-score anomaly detector with a configurable threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyDetector {
    threshold: f64,
}

impl Default for AnomalyDetector {
    /// Three-sigma rule.
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

impl AnomalyDetector {
    pub const DEFAULT_THRESHOLD: f64 = 3.0;

    /// A detector flagging |z| > `threshold`. The threshold must be a
    /// positive finite number.
    pub fn new(threshold: f64) -> AnalysisResult<Self> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(AnalysisError::invalid_parameter(
                "z_threshold",
                format!("must be a positive number, got {threshold}"),
            ));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Screen each metric of `dataset` independently.
    ///
    /// Metrics run in parallel on the rayon pool and are merged by metric
    /// key, so the result does not depend on scheduling. Duplicate metrics
    /// are screened once.
    pub fn detect(&self, dataset: &Dataset, metrics: &[MetricName]) -> AnalysisResult<AnomalySet> {
        let mut unique = metrics.to_vec();
        unique.sort_unstable();
        unique.dedup();

        let per_metric = unique
            .par_iter()
            .map(|&metric| self.detect_metric(dataset, metric).map(|found| (metric, found)))
            .collect::<AnalysisResult<Vec<_>>>()?;

        let by_metric: BTreeMap<MetricName, Vec<Anomaly>> = per_metric.into_iter().collect();
        let set = AnomalySet {
            threshold: self.threshold,
            by_metric,
        };

        info!(
            metrics = unique.len(),
            record_count = dataset.len(),
            anomaly_count = set.total(),
            threshold = self.threshold,
            "anomaly detection complete"
        );
        Ok(set)
    }

    fn detect_metric(&self, dataset: &Dataset, metric: MetricName) -> AnalysisResult<Vec<Anomaly>> {
        let column = dataset.column(metric)?;
        let records = dataset.records();
        let found: Vec<Anomaly> = zscore::detect(&column, self.threshold)
            .into_iter()
            .map(|o| Anomaly {
                index: o.index,
                record: records[o.index].clone(),
                value: o.value,
                z_score: o.z_score,
            })
            .collect();
        debug!(metric = %metric, anomaly_count = found.len(), "screened metric");
        Ok(found)
    }
}

/// Screen `metrics` with a detector at `z_threshold`.
pub fn detect_anomalies(
    dataset: &Dataset,
    metrics: &[MetricName],
    z_threshold: f64,
) -> AnalysisResult<AnomalySet> {
    AnomalyDetector::new(z_threshold)?.detect(dataset, metrics)
}

#[cfg(test)]
mod tests {
    use finlens_core::types::{Month, Record};

    use super::*;

    fn dataset(revenue: &[f64], margin: f64) -> Dataset {
        Dataset::new(
            revenue
                .iter()
                .enumerate()
                .map(|(i, &r)| {
                    Record::new(2020, Month::ALL[i % 12], format!("D{i}"))
                        .with_metric(MetricName::Revenue, r)
                        .with_metric(MetricName::SalesMargin, margin)
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_non_positive_threshold() {
        assert!(AnomalyDetector::new(0.0).is_err());
        assert!(AnomalyDetector::new(-3.0).is_err());
        assert!(AnomalyDetector::new(f64::NAN).is_err());
        assert_eq!(AnomalyDetector::default().threshold(), 3.0);
    }

    #[test]
    fn constant_metric_has_empty_entry() {
        let mut revenue = vec![100.0; 40];
        revenue[3] = 1_000.0;
        let ds = dataset(&revenue, 12.5);
        let set = AnomalyDetector::default()
            .detect(&ds, &[MetricName::Revenue, MetricName::SalesMargin])
            .unwrap();
        assert!(set.for_metric(MetricName::SalesMargin).is_empty());
        assert!(set.by_metric.contains_key(&MetricName::SalesMargin));
        let flagged = set.for_metric(MetricName::Revenue);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].index, 3);
        assert_eq!(flagged[0].record.department, "D3");
    }

    #[test]
    fn missing_metric_is_an_error() {
        let ds = dataset(&[1.0, 2.0], 1.0);
        assert!(AnomalyDetector::default().detect(&ds, &[MetricName::Assets]).is_err());
    }

    #[test]
    fn empty_dataset_yields_empty_entries() {
        let set = detect_anomalies(&Dataset::default(), &[MetricName::Revenue], 3.0).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.by_metric.len(), 1);
    }
}
