//! # finlens-bench
//!
//! Benchmarks for the finlens pipeline, plus the deterministic synthetic
//! company datasets they (and the integration tests) run on.

pub mod fixtures;

pub use fixtures::{generate_dataset, write_csv, FixtureSpec, SimpleRng};
