/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct is the central state container, holding:
 * - The optional PostgreSQL connection pool
 * - The per-story broadcast channel registry
 * - The presence registry
 *
 * # Thread Safety
 *
 * All state is designed to be thread-safe:
 * - `PgPool` is internally reference-counted
 * - `StoryRooms` and `PresenceRegistry` wrap their maps in `Arc<Mutex<>>`
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 */

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::error::ApiError;
use crate::backend::realtime::broadcast::StoryRooms;
use crate::backend::realtime::presence::PresenceRegistry;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// `None` if the database is not configured (e.g., `DATABASE_URL`
    /// unset). Handlers answer 503 for persistence-backed routes in that
    /// case.
    pub db_pool: Option<PgPool>,

    /// Per-story broadcast channels for real-time fan-out
    pub rooms: StoryRooms,

    /// Active users per story
    pub presence: PresenceRegistry,
}

impl AppState {
    /// Create state around an optional database pool
    pub fn new(db_pool: Option<PgPool>) -> Self {
        Self {
            db_pool,
            rooms: StoryRooms::new(),
            presence: PresenceRegistry::new(),
        }
    }

    /// The database pool, or `Unavailable` when not configured
    pub fn pool(&self) -> Result<&PgPool, ApiError> {
        self.db_pool.as_ref().ok_or(ApiError::Unavailable)
    }
}

/// Allow handlers to extract the optional database pool directly
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// Allow handlers to extract the story room registry directly
impl FromRef<AppState> for StoryRooms {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.rooms.clone()
    }
}

/// Allow handlers to extract the presence registry directly
impl FromRef<AppState> for PresenceRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.presence.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_unavailable_without_database() {
        let state = AppState::new(None);
        assert!(matches!(state.pool(), Err(ApiError::Unavailable)));
    }
}
