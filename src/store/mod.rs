//! Memory Store
//!
//! Structured, non-durable storage keyed by user id:
//!
//! - **types**: Record types (CycleInfo, MoodLogEntry, Pattern)
//! - **memory**: The `MemoryStore` itself
//! - **error**: Error types

pub mod error;
pub mod memory;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use types::{
    CycleInfo, MoodLogEntry, MoodLogQuery, NewMoodLog, Pattern, PatternKind, StoreStats,
};
