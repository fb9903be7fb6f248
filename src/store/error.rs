//! Memory store error types

use thiserror::Error;

/// Errors that can occur in the memory store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Every record is partitioned by user id, so it cannot be blank
    #[error("User id cannot be empty")]
    EmptyUserId,

    /// Cycle length must be at least one day
    #[error("Invalid cycle length: {0}")]
    InvalidCycleLength(u32),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
