//! Statistical anomaly detection.
//!
//! Each metric is screened independently with a population z-score test;
//! a record can be flagged under several metrics at once.

pub mod detector;
pub mod types;
pub mod zscore;

pub use detector::{detect_anomalies, AnomalyDetector};
pub use types::{Anomaly, AnomalySet};
