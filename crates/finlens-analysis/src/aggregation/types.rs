//! Aggregation types.

use std::collections::BTreeMap;
use std::fmt;

use finlens_core::types::{MetricName, Month, Record};
use serde::{Deserialize, Serialize};

/// Dimension records are partitioned by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    Year,
    Month,
    Department,
}

impl GroupBy {
    /// The key `record` falls under for this dimension.
    pub fn key_of(&self, record: &Record) -> GroupKey {
        match self {
            Self::Year => GroupKey::Year(record.year),
            Self::Month => GroupKey::Month(record.month),
            Self::Department => GroupKey::Department(record.department.clone()),
        }
    }
}

/// Value of a group dimension. Within one result every key has the same
/// variant, so the derived ordering is the natural one: chronological for
/// years and months, lexical for departments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum GroupKey {
    Year(i32),
    Month(Month),
    Department(String),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(y) => write!(f, "{y}"),
            Self::Month(m) => write!(f, "{m}"),
            Self::Department(d) => f.write_str(d),
        }
    }
}

/// Per-metric reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reducer {
    Mean,
    /// Sample standard deviation; NaN for groups with fewer than two records.
    Std,
    Max,
}

/// Reduced values for one metric in one group. A field is `Some` exactly
/// when its reducer was requested.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ReducedValues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// One group of the partition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub key: GroupKey,
    /// Number of records in the group.
    pub count: usize,
    pub metrics: BTreeMap<MetricName, ReducedValues>,
}

/// Groups in natural key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    pub group_by: GroupBy,
    pub groups: Vec<GroupStats>,
}

impl AggregationResult {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.groups.iter().map(|g| &g.key)
    }

    pub fn get(&self, key: &GroupKey) -> Option<&GroupStats> {
        self.groups
            .binary_search_by(|g| g.key.cmp(key))
            .ok()
            .map(|i| &self.groups[i])
    }

    /// Reduced values of `metric` in the group keyed `key`.
    pub fn values(&self, key: &GroupKey, metric: MetricName) -> Option<&ReducedValues> {
        self.get(key).and_then(|g| g.metrics.get(&metric))
    }

    /// Mean of `metric` in the group keyed `key`, if it was computed.
    pub fn mean(&self, key: &GroupKey, metric: MetricName) -> Option<f64> {
        self.values(key, metric).and_then(|v| v.mean)
    }
}
