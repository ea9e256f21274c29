//! Dataset loading errors.

use super::analysis_error::AnalysisError;
use super::error_code::{self, FinlensErrorCode};

/// Errors that can occur while reading a tabular dataset from disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("CSV error at line {line}: {message}")]
    Csv { line: u64, message: String },

    #[error(transparent)]
    Schema(#[from] AnalysisError),
}

impl FinlensErrorCode for LoadError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::IO_ERROR,
            Self::Csv { .. } => error_code::CSV_ERROR,
            Self::Schema(e) => e.error_code(),
        }
    }
}
