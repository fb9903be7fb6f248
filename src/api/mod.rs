//! Cycle Wellness REST API
//!
//! HTTP API layer, built with Axum.
//!
//! # Endpoints
//!
//! ## Tools
//! - `GET /api/v1/tools` - List tools
//! - `POST /api/v1/tools/:name` - Invoke a tool
//!
//! ## Analysis
//! - `POST /api/v1/cycle/phase` - Calculate the current cycle phase
//! - `POST /api/v1/patterns/analyze` - Analyze mood records
//! - `POST /api/v1/recommendations` - Generate recommendations
//!
//! ## Users
//! - `PUT|GET /api/v1/users/:user_id/cycle` - Cycle info
//! - `POST|GET /api/v1/users/:user_id/moods` - Mood logs
//! - `GET /api/v1/users/:user_id/patterns` - Stored patterns
//! - `POST /api/v1/users/:user_id/patterns/refresh` - Re-analyze history
//! - `GET|PUT /api/v1/users/:user_id/preferences` - Preferences
//! - `POST /api/v1/users/:user_id/checkin` - Full check-in
//! - `DELETE /api/v1/users/:user_id` - Clear user data
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use cycle_wellness::api::{serve, AppState};
//! use cycle_wellness::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     serve(AppState::new(config)).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Tool routes
        .route("/tools", get(routes::tools::list_tools))
        .route("/tools/:name", post(routes::tools::call_tool))
        // Analysis routes
        .route("/cycle/phase", post(routes::analysis::cycle_phase))
        .route("/patterns/analyze", post(routes::analysis::analyze_patterns))
        .route("/recommendations", post(routes::analysis::recommendations))
        // User routes
        .route("/users/:user_id", delete(routes::users::delete_user))
        .route(
            "/users/:user_id/cycle",
            get(routes::users::get_cycle).put(routes::users::put_cycle),
        )
        .route(
            "/users/:user_id/moods",
            get(routes::users::list_moods).post(routes::users::add_mood),
        )
        .route("/users/:user_id/patterns", get(routes::users::list_patterns))
        .route(
            "/users/:user_id/patterns/refresh",
            post(routes::users::refresh_patterns),
        )
        .route(
            "/users/:user_id/preferences",
            get(routes::users::get_preferences).put(routes::users::put_preferences),
        )
        .route("/users/:user_id/checkin", post(routes::checkin::check_in));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.server);
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs.max(1));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive when no origins are configured
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Start the API server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.server.bind_address();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Cycle Wellness API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Cycle Wellness API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
