//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use crate::analysis::AnalysisOutcome;
use crate::cycle::CycleStatus;
use crate::store::{CycleInfo, MoodLogEntry, Pattern, StoreStats};
use crate::tools::ToolSpec;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// ============================================
// ANALYTICAL DTOs
// ============================================

/// Cycle phase request
#[derive(Debug, Deserialize, Serialize)]
pub struct CyclePhaseRequest {
    /// Start of the last period (YYYY-MM-DD)
    pub last_period_date: String,
    /// Defaults to the configured cycle length
    #[serde(default)]
    pub cycle_length: Option<i64>,
}

/// Pattern analysis request
#[derive(Debug, Deserialize, Serialize)]
pub struct AnalyzeRequest {
    /// Mood records as a list, or a string holding a JSON list
    #[serde(default)]
    pub mood_logs: Value,
}

/// Recommendation request
#[derive(Debug, Deserialize, Serialize)]
pub struct RecommendationRequest {
    pub cycle_phase: String,
    pub mood: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
}

// ============================================
// TOOL DTOs
// ============================================

#[derive(Debug, Serialize)]
pub struct ToolListResponse {
    pub tools: Vec<ToolSpec>,
    pub total: usize,
}

// ============================================
// USER DTOs
// ============================================

/// Cycle info update. `cycle_length` defaults to the configured length.
pub type CycleInfoRequest = CyclePhaseRequest;

/// Stored cycle info with the phase it implies today
#[derive(Debug, Serialize)]
pub struct CycleInfoResponse {
    pub user_id: String,
    pub cycle: CycleInfo,
    pub status: CycleStatus,
}

/// New mood log
#[derive(Debug, Deserialize, Serialize)]
pub struct MoodLogRequest {
    /// Entry date (YYYY-MM-DD), defaults to today
    #[serde(default)]
    pub date: Option<String>,
    /// Derived from stored cycle info when absent
    #[serde(default)]
    pub cycle_phase: Option<String>,
    pub mood: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Query parameters for mood history
#[derive(Debug, Default, Deserialize)]
pub struct MoodLogParams {
    pub limit: Option<usize>,
    pub phase: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MoodLogListResponse {
    pub user_id: String,
    pub total: usize,
    pub logs: Vec<MoodLogEntry>,
}

/// Query parameters for stored patterns
#[derive(Debug, Default, Deserialize)]
pub struct PatternParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PatternListResponse {
    pub user_id: String,
    pub total: usize,
    pub patterns: Vec<Pattern>,
}

/// Result of re-analyzing a user's history
#[derive(Debug, Serialize)]
pub struct PatternRefreshResponse {
    pub user_id: String,
    pub analysis: AnalysisOutcome,
    pub patterns_stored: usize,
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub user_id: String,
    pub preferences: BTreeMap<String, String>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub store: StoreStats,
    pub tools: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
