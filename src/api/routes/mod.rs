//! API Routes
//!
//! Route handlers organized by functionality.

pub mod analysis;
pub mod checkin;
pub mod health;
pub mod tools;
pub mod users;
