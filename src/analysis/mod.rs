//! Mood Pattern Analysis
//!
//! - **patterns**: Pattern detectors over mood log history
//! - **sentiment**: Positive/negative mood classification

pub mod patterns;
pub mod sentiment;

pub use patterns::{
    AnalysisOutcome, MoodRecord, PatternAnalyzer, PatternFinding, PatternReport, Trend,
};
pub use sentiment::Sentiment;
