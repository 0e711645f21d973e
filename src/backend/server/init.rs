/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP
 * server: state creation, database loading, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Load the optional database pool (runs migrations when available)
 * 2. Create the application state (story rooms, presence registry)
 * 3. Create and configure the router
 *
 * # Error Handling
 *
 * The function is resilient: a missing database disables
 * persistence-backed routes but does not prevent startup.
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing Storyloom backend server");

    let db_pool = load_database().await;
    if db_pool.is_some() {
        tracing::info!("Database connected");
    }

    let app_state = AppState::new(db_pool);

    create_router(app_state)
}
