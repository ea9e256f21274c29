//! A single row of the financial table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{MetricName, Month};

/// One observation: a department's metrics for a given month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub year: i32,
    pub month: Month,
    pub department: String,
    pub metrics: BTreeMap<MetricName, f64>,
}

impl Record {
    /// Create a record with no metrics.
    pub fn new(year: i32, month: Month, department: impl Into<String>) -> Self {
        Self {
            year,
            month,
            department: department.into(),
            metrics: BTreeMap::new(),
        }
    }

    /// Builder-style metric setter.
    pub fn with_metric(mut self, metric: MetricName, value: f64) -> Self {
        self.metrics.insert(metric, value);
        self
    }

    /// The value of `metric`, if this record carries it.
    pub fn metric(&self, metric: MetricName) -> Option<f64> {
        self.metrics.get(&metric).copied()
    }
}
