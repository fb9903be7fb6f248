//! Cycle calculation error types

use thiserror::Error;

/// Errors that can occur while computing a cycle status
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CycleError {
    /// Date string is not a valid `YYYY-MM-DD` calendar date
    #[error("Invalid date format. Please use YYYY-MM-DD format. Error: {0}")]
    InvalidDate(String),

    /// Cycle length must be at least one day
    #[error("Invalid cycle length: {0} (must be a positive number of days)")]
    InvalidCycleLength(i64),

    /// Date arithmetic left chrono's supported range
    #[error("Date out of range: {0}")]
    DateOutOfRange(String),
}

/// Result type alias for cycle calculations
pub type CycleResult<T> = Result<T, CycleError>;
