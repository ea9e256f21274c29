//! Pairwise Pearson correlation over full metric columns.

use finlens_core::errors::{AnalysisError, AnalysisResult};
use finlens_core::types::{Dataset, MetricName};
use serde::Serialize;
use tracing::{debug, warn};

use crate::stats;

/// Square, symmetric correlation matrix.
///
/// The diagonal is exactly 1.0. Off-diagonal cells involving a constant
/// column are NaN: Pearson correlation is undefined without variance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub metrics: Vec<MetricName>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.metrics.len()
    }

    /// Correlation between two metrics, if both are in the matrix.
    pub fn get(&self, a: MetricName, b: MetricName) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.values[i][j])
    }

    pub fn index_of(&self, metric: MetricName) -> Option<usize> {
        self.metrics.iter().position(|&m| m == metric)
    }
}

/// Correlate every pair of `metrics` over the whole dataset.
///
/// Duplicate metrics are dropped, keeping first-seen order. Fewer than two
/// records is `InsufficientData`.
pub fn correlate(dataset: &Dataset, metrics: &[MetricName]) -> AnalysisResult<CorrelationMatrix> {
    if dataset.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            operation: "correlation",
            required: 2,
            actual: dataset.len(),
        });
    }

    let mut ordered: Vec<MetricName> = Vec::with_capacity(metrics.len());
    for &m in metrics {
        if !ordered.contains(&m) {
            ordered.push(m);
        }
    }

    let columns = ordered
        .iter()
        .map(|&m| dataset.column(m))
        .collect::<AnalysisResult<Vec<_>>>()?;

    for (metric, column) in ordered.iter().zip(&columns) {
        if stats::is_constant(column) {
            warn!(metric = %metric, "constant column, correlations are undefined");
        }
    }

    let n = ordered.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        values[i][i] = 1.0;
        for j in (i + 1)..n {
            let r = stats::pearson(&columns[i], &columns[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    debug!(metrics = n, record_count = dataset.len(), "computed correlation matrix");

    Ok(CorrelationMatrix {
        metrics: ordered,
        values,
    })
}
