//! # finlens-core
//!
//! Shared foundation for the finlens analytics pipeline: the typed data
//! model (metrics, months, records, datasets), one error enum per
//! subsystem, layered TOML configuration, tracing setup, and the
//! forecast-model plug-in trait.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;

pub use errors::{AnalysisError, ConfigError, FinlensErrorCode, LoadError};
pub use types::{Dataset, DatasetFilter, MetricName, Month, Record};
