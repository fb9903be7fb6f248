//! Check-in Route
//!
//! - POST /api/v1/users/:user_id/checkin - Intake, analysis and wellness
//!   recommendations in one call

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::extract::ApiJson;
use crate::api::state::AppState;
use crate::checkin::{CheckInReport, CheckInRequest};

/// POST /api/v1/users/:user_id/checkin
pub async fn check_in(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    ApiJson(req): ApiJson<CheckInRequest>,
) -> ApiResult<Json<CheckInReport>> {
    let report = state.checkin.check_in(&user_id, req).await?;
    Ok(Json(report))
}
