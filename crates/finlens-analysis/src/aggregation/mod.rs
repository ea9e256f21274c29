//! Group-by aggregation over a dataset.
//!
//! Partitions records by year, calendar month or department and reduces the
//! selected metrics per group. Also provides department-style top-N
//! rankings and whole-column descriptive summaries.

pub mod aggregator;
pub mod describe;
pub mod types;

pub use aggregator::{aggregate, top_n};
pub use describe::{describe, MetricSummary};
pub use types::{AggregationResult, GroupBy, GroupKey, GroupStats, ReducedValues, Reducer};
