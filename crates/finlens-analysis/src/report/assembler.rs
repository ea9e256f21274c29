//! Report assembler.

use std::time::Instant;

use finlens_core::config::{AnalysisConfig, AnomalyScope, FinlensConfig};
use finlens_core::errors::{AnalysisError, AnalysisResult};
use finlens_core::types::{Dataset, DatasetFilter};
use tracing::info;

use super::types::{RankedGroup, Report};
use crate::aggregation::{aggregate, describe, top_n, GroupBy, Reducer};
use crate::anomaly::AnomalyDetector;
use crate::correlation::correlate;

/// Runs every analysis against one dataset snapshot and bundles the
/// results.
///
/// Sub-analysis errors are not caught: any failure aborts the whole report
/// and is returned unchanged. A `Report` is never partial.
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    config: AnalysisConfig,
    detector: AnomalyDetector,
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self {
            config: AnalysisConfig::default(),
            detector: AnomalyDetector::default(),
        }
    }
}

impl ReportAssembler {
    /// Validate `config` and build an assembler from it.
    pub fn new(config: AnalysisConfig) -> AnalysisResult<Self> {
        let detector = AnomalyDetector::new(config.effective_anomaly_threshold())?;
        if config.effective_top_n() == 0 {
            return Err(AnalysisError::invalid_parameter("top_n", "must be at least 1"));
        }
        Ok(Self { config, detector })
    }

    pub fn from_config(config: &FinlensConfig) -> AnalysisResult<Self> {
        Self::new(config.analysis.clone())
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Build a report over the whole dataset.
    pub fn build_report(&self, dataset: &Dataset) -> AnalysisResult<Report> {
        self.assemble(dataset, dataset, None)
    }

    /// Build a report over the records passing `filter`.
    ///
    /// The filtered snapshot is derived once and shared by every analysis.
    /// Anomaly detection uses the full dataset instead only when the
    /// configured scope is [`AnomalyScope::Full`].
    pub fn build_report_filtered(
        &self,
        dataset: &Dataset,
        filter: &DatasetFilter,
    ) -> AnalysisResult<Report> {
        let snapshot = dataset.filter(filter);
        let anomaly_source = match self.config.effective_anomaly_scope() {
            AnomalyScope::Filtered => &snapshot,
            AnomalyScope::Full => dataset,
        };
        self.assemble(&snapshot, anomaly_source, Some(filter.clone()))
    }

    fn assemble(
        &self,
        snapshot: &Dataset,
        anomaly_source: &Dataset,
        filter: Option<DatasetFilter>,
    ) -> AnalysisResult<Report> {
        let started = Instant::now();
        let cfg = &self.config;

        let yearly_trends =
            aggregate(snapshot, GroupBy::Year, &cfg.effective_trend_metrics(), &[Reducer::Mean])?;
        let seasonality = aggregate(
            snapshot,
            GroupBy::Month,
            &cfg.effective_seasonality_metrics(),
            &[Reducer::Mean],
        )?;
        let departments = aggregate(
            snapshot,
            GroupBy::Department,
            &cfg.effective_department_metrics(),
            &[Reducer::Mean, Reducer::Std],
        )?;

        let top_metric = cfg.effective_top_metric();
        let top_departments =
            top_n(snapshot, GroupBy::Department, top_metric, cfg.effective_top_n())?
                .into_iter()
                .map(|(key, value)| RankedGroup { key, value })
                .collect();

        let correlation_metrics = cfg.effective_correlation_metrics();
        let correlations = correlate(snapshot, &correlation_metrics)?;
        let summary = describe(snapshot, &correlation_metrics)?;
        let anomalies = self
            .detector
            .detect(anomaly_source, &cfg.effective_anomaly_metrics())?;

        info!(
            record_count = snapshot.len(),
            anomaly_count = anomalies.total(),
            report_build_ms = started.elapsed().as_millis() as u64,
            "report assembled"
        );

        Ok(Report {
            record_count: snapshot.len(),
            filter,
            anomaly_scope: cfg.effective_anomaly_scope(),
            yearly_trends,
            seasonality,
            departments,
            top_metric,
            top_departments,
            correlations,
            anomalies,
            summary,
        })
    }
}
