//! Analysis Routes
//!
//! Stateless endpoints for the three analytical functions.
//!
//! - POST /api/v1/cycle/phase - Current phase and next period
//! - POST /api/v1/patterns/analyze - Patterns in a list of mood records
//! - POST /api/v1/recommendations - Wellness recommendations

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::analysis::AnalysisOutcome;
use crate::api::dto::{AnalyzeRequest, CyclePhaseRequest, RecommendationRequest};
use crate::api::error::ApiResult;
use crate::api::extract::ApiJson;
use crate::api::state::AppState;
use crate::cycle::CycleStatus;
use crate::recommend::RecommendationOutcome;

/// POST /api/v1/cycle/phase
pub async fn cycle_phase(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CyclePhaseRequest>,
) -> ApiResult<Json<CycleStatus>> {
    let status = state
        .calculator
        .calculate(&req.last_period_date, req.cycle_length)?;
    Ok(Json(status))
}

/// POST /api/v1/patterns/analyze
///
/// Always 200; the outcome's `status` distinguishes success, no data and
/// malformed records.
pub async fn analyze_patterns(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<AnalyzeRequest>,
) -> Json<AnalysisOutcome> {
    Json(state.analyzer.analyze_value(&req.mood_logs))
}

/// POST /api/v1/recommendations
pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RecommendationRequest>,
) -> Json<RecommendationOutcome> {
    let report = state
        .generator
        .generate(&req.cycle_phase, &req.mood, &req.symptoms);
    Json(report.into())
}
