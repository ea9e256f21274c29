//! Error handling for finlens.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod analysis_error;
pub mod config_error;
pub mod error_code;
pub mod load_error;

pub use analysis_error::{AnalysisError, AnalysisResult};
pub use config_error::ConfigError;
pub use error_code::FinlensErrorCode;
pub use load_error::LoadError;
