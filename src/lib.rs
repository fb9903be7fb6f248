//! # Cycle Wellness
//!
//! Menstrual cycle phase tracking, mood pattern analysis and phase-aware
//! wellness recommendations, served over a JSON API.
//!
//! ## Features
//!
//! - **Cycle phases**: Phase and next-period prediction from the last period date
//! - **Pattern analysis**: Phase-mood correlations, frequent symptoms, mood trend
//! - **Recommendations**: Phase, mood and symptom specific suggestions
//! - **Check-ins**: Intake, analysis and recommendations in one workflow
//! - **Crisis detection**: Flags crisis language and attaches help resources
//!
//! ## Modules
//!
//! - [`cycle`]: Cycle phase calculator
//! - [`analysis`]: Mood pattern analyzer
//! - [`recommend`]: Recommendation generator
//! - [`store`]: Per-user memory store
//! - [`safety`]: Crisis language detection
//! - [`tools`]: JSON tool registry over the analytical functions
//! - [`checkin`]: Check-in workflow
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cycle_wellness::{CycleCalculator, PatternAnalyzer, RecommendationGenerator};
//!
//! let status = CycleCalculator::default().calculate("2025-11-18", Some(28))?;
//! println!("{} (day {})", status.current_phase, status.day_in_cycle);
//!
//! let outcome = PatternAnalyzer::new().analyze_json(r#"[{"cycle_phase": "Luteal", "mood": "anxious"}]"#);
//! println!("{}", outcome.status());
//!
//! let report = RecommendationGenerator::new().generate("Luteal", "anxious", &["cramps"]);
//! println!("{} categories", report.recommendations.len());
//! # Ok::<(), cycle_wellness::CycleError>(())
//! ```

pub mod analysis;
pub mod api;
pub mod checkin;
pub mod config;
pub mod cycle;
pub mod logging;
pub mod recommend;
pub mod safety;
pub mod store;
pub mod tools;

// Re-export top-level types for convenience
pub use cycle::{CycleCalculator, CycleError, CyclePhase, CycleResult, CycleStatus};

pub use analysis::{AnalysisOutcome, MoodRecord, PatternAnalyzer, PatternFinding, PatternReport};

pub use recommend::{RecommendationGenerator, RecommendationOutcome, RecommendationReport};

pub use store::{
    CycleInfo, MemoryStore, MoodLogEntry, MoodLogQuery, NewMoodLog, Pattern, PatternKind,
    StoreError, StoreResult,
};

pub use safety::{CrisisAssessment, CrisisDetector};

pub use tools::{Tool, ToolError, ToolRegistry};

pub use checkin::{CheckInError, CheckInReport, CheckInRequest, CheckInService};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, CycleConfig, LoggingConfig, ServerConfig, StoreConfig};
