//! Immutable, validated in-memory dataset.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{MetricName, Record};
use crate::errors::{AnalysisError, AnalysisResult};

/// An ordered sequence of records, read-only once constructed.
///
/// Records live behind an `Arc`, so cloning a dataset hands out another
/// handle to the same snapshot rather than copying rows.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[Record]>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            records: Arc::from(Vec::new()),
        }
    }
}

impl Dataset {
    /// Validate and wrap a set of records.
    ///
    /// Every metric value must be finite, and Revenue and Assets must be
    /// strictly positive wherever present.
    pub fn new(records: Vec<Record>) -> AnalysisResult<Self> {
        for (index, record) in records.iter().enumerate() {
            for (&metric, &value) in &record.metrics {
                if !value.is_finite() {
                    return Err(AnalysisError::InvalidSchema(format!(
                        "record {index}: {metric} is not a finite number ({value})"
                    )));
                }
                if metric.requires_positive() && value <= 0.0 {
                    return Err(AnalysisError::InvalidSchema(format!(
                        "record {index}: {metric} must be strictly positive, got {value}"
                    )));
                }
            }
        }
        Ok(Self {
            records: records.into(),
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The full column for `metric`, in record order.
    ///
    /// Fails with `InvalidSchema` naming the first record that lacks it.
    pub fn column(&self, metric: MetricName) -> AnalysisResult<Vec<f64>> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, r)| {
                r.metric(metric).ok_or_else(|| {
                    let message = format!("record {index} has no value for {metric}");
                    AnalysisError::InvalidSchema(message)
                })
            })
            .collect()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        let set: BTreeSet<i32> = self.records.iter().map(|r| r.year).collect();
        set.into_iter().collect()
    }

    /// Distinct department identifiers, ascending.
    pub fn departments(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.records.iter().map(|r| r.department.as_str()).collect();
        set.into_iter().map(String::from).collect()
    }

    /// A new snapshot holding only the records that pass `filter`.
    pub fn filter(&self, filter: &DatasetFilter) -> Dataset {
        if filter.is_empty() {
            return self.clone();
        }
        let records: Vec<Record> = self
            .records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        Dataset {
            records: records.into(),
        }
    }

    /// Whether two handles point at the same snapshot.
    pub fn same_snapshot(&self, other: &Dataset) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }
}

/// Year-range and department subset filter, as applied by a dashboard
/// sidebar before analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetFilter {
    /// Inclusive `(from, to)` year range.
    pub years: Option<(i32, i32)>,
    /// Departments to keep. `None` keeps all.
    pub departments: Option<BTreeSet<String>>,
}

impl DatasetFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_years(mut self, from: i32, to: i32) -> Self {
        self.years = Some((from, to));
        self
    }

    pub fn with_departments<I, S>(mut self, departments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.departments = Some(departments.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_none() && self.departments.is_none()
    }

    pub fn matches(&self, record: &Record) -> bool {
        let year_ok = self
            .years
            .map_or(true, |(from, to)| (from..=to).contains(&record.year));
        let dept_ok = self
            .departments
            .as_ref()
            .map_or(true, |d| d.contains(&record.department));
        year_ok && dept_ok
    }
}
