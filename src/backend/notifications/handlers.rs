//! Notification HTTP Handlers
//!
//! - `GET /api/notifications` - latest notifications + unread count
//! - `PUT /api/notifications/{id}/read` - mark one read
//! - `PUT /api/notifications/read-all` - mark all read

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::notification::ListNotificationsResponse;

use super::db;

/// List the caller's notifications (GET /api/notifications)
pub async fn list_notifications(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<Json<ListNotificationsResponse>, ApiError> {
    let pool = state.pool()?;

    let notifications = db::list_for_recipient(pool, principal.user_id).await?;
    let unread_count = db::count_unread(pool, principal.user_id).await?;

    Ok(Json(ListNotificationsResponse {
        success: true,
        results: notifications.len(),
        unread_count,
        notifications,
    }))
}

/// Mark one notification read (PUT /api/notifications/{id}/read)
pub async fn mark_read(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let pool = state.pool()?;

    let notification = db::mark_read(pool, notification_id, principal.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Notification"))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "notification": notification,
    })))
}

/// Mark all notifications read (PUT /api/notifications/read-all)
pub async fn mark_all_read(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let pool = state.pool()?;

    db::mark_all_read(pool, principal.user_id).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "All notifications marked as read",
    })))
}
