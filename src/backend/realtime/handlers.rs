//! Presence and Typing HTTP Handlers
//!
//! - `POST /api/stories/{id}/presence` - join or leave a story room
//! - `POST /api/stories/{id}/typing` - typing indicator
//!
//! Both broadcast into the story room; the updated roster goes out on
//! every join and leave.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::realtime::presence::ActiveUser;
use crate::backend::server::state::AppState;
use crate::backend::stories::db as stories_db;
use crate::shared::event::RealtimeEvent;

/// Presence action
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PresenceAction {
    Join,
    Leave,
}

/// Request body for the presence endpoint
#[derive(Debug, Deserialize)]
pub struct PresenceRequest {
    pub action: PresenceAction,
}

/// Request body for the typing endpoint
#[derive(Debug, Deserialize)]
pub struct TypingRequest {
    pub is_typing: bool,
}

/// Join or leave a story room (POST /api/stories/{id}/presence)
pub async fn handle_presence(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(story_id): Path<Uuid>,
    Json(request): Json<PresenceRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let pool = state.pool()?;

    if stories_db::get_story(pool, story_id).await?.is_none() {
        return Err(ApiError::not_found("Story"));
    }

    let roster = match request.action {
        PresenceAction::Join => state.presence.join(
            story_id,
            ActiveUser {
                user_id: principal.user_id,
                username: principal.username.clone(),
            },
        ),
        PresenceAction::Leave => state.presence.leave(story_id, principal.user_id),
    };

    tracing::debug!(
        "{} {:?} story {} ({} active)",
        principal.username,
        request.action,
        story_id,
        roster.len()
    );

    state.rooms.broadcast(
        story_id,
        RealtimeEvent::active_users(serde_json::json!(roster)),
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "activeUsers": roster,
    })))
}

/// Typing indicator (POST /api/stories/{id}/typing)
pub async fn handle_typing(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(story_id): Path<Uuid>,
    Json(request): Json<TypingRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.rooms.broadcast(
        story_id,
        RealtimeEvent::typing(principal.user_id, &principal.username, request.is_typing),
    );

    Ok(Json(serde_json::json!({ "success": true })))
}
