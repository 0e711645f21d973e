/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Health endpoint
 * 2. API routes (auth, stories, contributions, votes, collaborators,
 *    notifications, real-time)
 * 3. Fallback handler (404)
 */

use axum::{http::StatusCode, routing::get, Json, Router};
use tower_http::trace::TraceLayer;

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Liveness endpoint
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing the database pool and the
///   real-time registries
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/health", get(health));

    let router = configure_api_routes(router, app_state.clone());

    // Fallback handler for 404
    let router = router.fallback(|| async {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "success": false,
                "error": "Not Found",
                "status": 404,
            })),
        )
    });

    router.layer(TraceLayer::new_for_http()).with_state(app_state)
}
