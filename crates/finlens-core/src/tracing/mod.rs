//! Structured logging for the finlens crates: `tracing` events filtered
//! per module through `FINLENS_LOG`.

pub mod setup;

pub use setup::{init_tracing, log_filter, DEFAULT_DIRECTIVES, LOG_ENV_VAR};
