//! User Routes
//!
//! Per-user records in the memory store.
//!
//! - PUT /api/v1/users/:user_id/cycle - Store cycle info
//! - GET /api/v1/users/:user_id/cycle - Cycle info and today's phase
//! - POST /api/v1/users/:user_id/moods - Append a mood log
//! - GET /api/v1/users/:user_id/moods - Mood history (`limit`, `phase`)
//! - GET /api/v1/users/:user_id/patterns - Stored patterns (`type`)
//! - POST /api/v1/users/:user_id/patterns/refresh - Re-analyze history
//! - GET /api/v1/users/:user_id/preferences - Preferences
//! - PUT /api/v1/users/:user_id/preferences - Merge preferences
//! - DELETE /api/v1/users/:user_id - Clear all data for the user

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{Local, NaiveDate};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::dto::{
    CycleInfoRequest, CycleInfoResponse, MoodLogListResponse, MoodLogParams, MoodLogRequest,
    PatternListResponse, PatternParams, PatternRefreshResponse, PreferencesResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::state::AppState;
use crate::cycle::{parse_date, CyclePhase};
use crate::store::{CycleInfo, MoodLogEntry, MoodLogQuery, NewMoodLog, PatternKind};

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn cycle_response(
    state: &AppState,
    user_id: String,
    cycle: CycleInfo,
) -> ApiResult<Json<CycleInfoResponse>> {
    let status = state
        .calculator
        .status_for(cycle.last_period_date, cycle.cycle_length, today())?;
    Ok(Json(CycleInfoResponse {
        user_id,
        cycle,
        status,
    }))
}

/// PUT /api/v1/users/:user_id/cycle
pub async fn put_cycle(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    ApiJson(req): ApiJson<CycleInfoRequest>,
) -> ApiResult<Json<CycleInfoResponse>> {
    let last_period = parse_date(&req.last_period_date)?;
    let length = state.calculator.validate_length(req.cycle_length)?;

    let cycle = state
        .store
        .store_cycle_info(&user_id, last_period, length)
        .await?;
    cycle_response(&state, user_id, cycle)
}

/// GET /api/v1/users/:user_id/cycle
pub async fn get_cycle(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<CycleInfoResponse>> {
    let cycle = state
        .store
        .get_cycle_info(&user_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("No cycle information for user {}", user_id)))?;
    cycle_response(&state, user_id, cycle)
}

/// POST /api/v1/users/:user_id/moods
///
/// Without an explicit `cycle_phase` the phase is derived from the stored
/// cycle info for the entry date.
pub async fn add_mood(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    ApiJson(req): ApiJson<MoodLogRequest>,
) -> ApiResult<(StatusCode, Json<MoodLogEntry>)> {
    if req.mood.trim().is_empty() {
        return Err(ApiError::Validation("mood cannot be empty".to_string()));
    }

    let date = match req.date.as_deref() {
        Some(date) => parse_date(date)?,
        None => today(),
    };

    let phase = match req.cycle_phase.as_deref() {
        Some(phase) => phase
            .parse::<CyclePhase>()
            .map_err(|e| ApiError::Validation(e.to_string()))?,
        None => {
            let cycle = state.store.get_cycle_info(&user_id).await.ok_or_else(|| {
                ApiError::Validation(
                    "cycle_phase is required when no cycle information is stored".to_string(),
                )
            })?;
            state
                .calculator
                .status_for(cycle.last_period_date, cycle.cycle_length, date)?
                .current_phase
        }
    };

    let mut log = NewMoodLog::new(date, phase, req.mood).symptoms(req.symptoms);
    if let Some(notes) = req.notes {
        log = log.notes(notes);
    }

    let entry = state.store.add_mood_log(&user_id, log).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/users/:user_id/moods
pub async fn list_moods(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    ApiQuery(params): ApiQuery<MoodLogParams>,
) -> ApiResult<Json<MoodLogListResponse>> {
    let mut query =
        MoodLogQuery::new().limit(params.limit.unwrap_or(state.config.store.default_log_limit));
    if let Some(phase) = params.phase.as_deref() {
        let phase = phase
            .parse::<CyclePhase>()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        query = query.phase(phase);
    }

    let logs = state.store.get_mood_logs(&user_id, &query).await;
    Ok(Json(MoodLogListResponse {
        user_id,
        total: logs.len(),
        logs,
    }))
}

/// GET /api/v1/users/:user_id/patterns
pub async fn list_patterns(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    ApiQuery(params): ApiQuery<PatternParams>,
) -> ApiResult<Json<PatternListResponse>> {
    let kind = params
        .kind
        .as_deref()
        .map(str::parse::<PatternKind>)
        .transpose()
        .map_err(ApiError::Validation)?;

    let patterns = state.store.get_patterns(&user_id, kind).await;
    Ok(Json(PatternListResponse {
        user_id,
        total: patterns.len(),
        patterns,
    }))
}

/// POST /api/v1/users/:user_id/patterns/refresh
pub async fn refresh_patterns(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<PatternRefreshResponse>> {
    let refresh = state.checkin.refresh_patterns(&user_id).await?;
    Ok(Json(PatternRefreshResponse {
        user_id,
        analysis: refresh.analysis,
        patterns_stored: refresh.patterns_stored,
    }))
}

/// GET /api/v1/users/:user_id/preferences
pub async fn get_preferences(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Json<PreferencesResponse> {
    let preferences = state.store.get_preferences(&user_id).await;
    Json(PreferencesResponse {
        user_id,
        preferences: preferences.into_iter().collect(),
    })
}

/// PUT /api/v1/users/:user_id/preferences
///
/// Merges the given keys into the stored preferences.
pub async fn put_preferences(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    ApiJson(updates): ApiJson<HashMap<String, String>>,
) -> ApiResult<Json<PreferencesResponse>> {
    for (key, value) in updates {
        if key.trim().is_empty() {
            return Err(ApiError::Validation("preference keys cannot be empty".to_string()));
        }
        state.store.set_preference(&user_id, key, value).await?;
    }
    Ok(get_preferences(State(state), Path(user_id)).await)
}

/// DELETE /api/v1/users/:user_id
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> StatusCode {
    state.store.clear_user(&user_id).await;
    StatusCode::NO_CONTENT
}
