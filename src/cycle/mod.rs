//! Cycle Tracking
//!
//! - **phase**: The four cycle phases and their day boundaries
//! - **calculator**: Phase and next-period calculation
//! - **error**: Error types

pub mod calculator;
pub mod error;
pub mod phase;

pub use calculator::{parse_date, CycleCalculator, CycleStatus, DATE_FORMAT};
pub use error::{CycleError, CycleResult};
pub use phase::{CyclePhase, ParsePhaseError};
