//! FinlensErrorCode trait for structured error reporting.

/// Stable, machine-readable code for every finlens error.
/// Presentation layers match on the code rather than the message text.
pub trait FinlensErrorCode {
    /// Returns the error code string (e.g., "INSUFFICIENT_DATA").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_SCHEMA: &str = "INVALID_SCHEMA";
pub const INSUFFICIENT_DATA: &str = "INSUFFICIENT_DATA";
pub const INVALID_PARAMETER: &str = "INVALID_PARAMETER";
pub const FORECAST_MODEL_ERROR: &str = "FORECAST_MODEL_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const IO_ERROR: &str = "IO_ERROR";
pub const CSV_ERROR: &str = "CSV_ERROR";
