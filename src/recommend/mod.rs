//! Wellness Recommendations
//!
//! - **tables**: Static phase, mood and symptom suggestion tables
//! - **generator**: Assembles categorized recommendations

pub mod generator;
pub mod tables;

pub use generator::{
    CategoryKind, RecommendationCategory, RecommendationGenerator, RecommendationOutcome,
    RecommendationReport,
};
pub use tables::{phase_guide, Mood, PhaseGuide, Symptom};
