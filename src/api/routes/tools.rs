//! Tool Routes
//!
//! - GET /api/v1/tools - List tools with their argument schemas
//! - POST /api/v1/tools/:name - Invoke a tool with a JSON arguments object

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::api::dto::ToolListResponse;
use crate::api::error::ApiResult;
use crate::api::extract::ApiJson;
use crate::api::state::AppState;

/// GET /api/v1/tools
pub async fn list_tools(State(state): State<Arc<AppState>>) -> Json<ToolListResponse> {
    let tools = state.tools.specs();
    Json(ToolListResponse {
        total: tools.len(),
        tools,
    })
}

/// POST /api/v1/tools/:name
///
/// Domain failures come back with 200 and an error value in the body;
/// only unknown tools and non-object arguments are HTTP errors.
pub async fn call_tool(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    ApiJson(args): ApiJson<Value>,
) -> ApiResult<Json<Value>> {
    let result = state.tools.call(&name, args).await?;
    Ok(Json(result))
}
