//! Analysis errors raised by the aggregation, correlation, anomaly and
//! forecast stages.

use super::error_code::{self, FinlensErrorCode};

/// Errors that can occur while analysing a dataset.
///
/// Degenerate-but-valid numeric cases (zero variance, a single sample) are
/// not errors; they are reported in-band with NaN or empty results.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Insufficient data for {operation}: need at least {required}, got {actual}")]
    InsufficientData {
        operation: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("Invalid parameter {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },

    #[error("Forecast model {model} failed: {message}")]
    ForecastModel { model: String, message: String },
}

impl AnalysisError {
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

impl FinlensErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSchema(_) => error_code::INVALID_SCHEMA,
            Self::InsufficientData { .. } => error_code::INSUFFICIENT_DATA,
            Self::InvalidParameter { .. } => error_code::INVALID_PARAMETER,
            Self::ForecastModel { .. } => error_code::FORECAST_MODEL_ERROR,
        }
    }
}

/// Shorthand result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
