//! # finlens-analysis
//!
//! The analytical pipeline over an immutable [`Dataset`](finlens_core::Dataset):
//!
//! - [`aggregation`]: group-by reduction (mean, std, max), top-N rankings
//!   and descriptive summaries
//! - [`correlation`]: pairwise Pearson matrix
//! - [`anomaly`]: per-metric z-score outlier screening
//! - [`forecast`]: guard-railed growth extrapolation, or an external model
//! - [`report`]: one-pass assembly of all of the above
//! - [`loader`]: CSV input with validated column mapping, plus a
//!   memoizing dataset cache
//!
//! Every stage only reads the dataset. Validation failures are returned to
//! the caller; degenerate numeric cases are reported in-band.

pub mod aggregation;
pub mod anomaly;
pub mod correlation;
pub mod forecast;
pub mod loader;
pub mod report;
pub mod stats;

pub use aggregation::{aggregate, describe, top_n, AggregationResult, GroupBy, GroupKey, Reducer};
pub use anomaly::{AnomalyDetector, AnomalySet};
pub use correlation::{correlate, CorrelationMatrix};
pub use forecast::{ForecastSeries, TrendForecaster};
pub use report::{Report, ReportAssembler};
