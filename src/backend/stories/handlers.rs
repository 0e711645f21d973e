//! Story HTTP Handlers
//!
//! CRUD endpoints for stories, plus likes, views, and platform stats.
//! Listing and fetching are optionally authenticated: private stories are
//! visible only to their creator or an admin.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::auth::users::count_users;
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::{principal_from_headers, AuthUser, AuthenticatedUser};
use crate::backend::server::state::AppState;
use crate::shared::story::{
    validate_description, validate_title, CreateStoryRequest, ListStoriesResponse, Pagination,
    PlatformStats, Story, StoryResponse, UpdateStoryRequest,
};

use super::db;

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

fn default_sort() -> String {
    "createdAt".to_string()
}

fn default_order() -> String {
    "desc".to_string()
}

/// Query parameters for listing stories
#[derive(Debug, Deserialize)]
pub struct ListStoriesQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub genre: Option<String>,
    pub status: Option<String>,
    #[serde(default = "default_sort")]
    pub sort: String,
    #[serde(default = "default_order")]
    pub order: String,
}

/// Whether `viewer` may see `story`
fn can_view(story: &Story, viewer: Option<&AuthenticatedUser>) -> bool {
    if !story.is_private {
        return true;
    }
    viewer.is_some_and(|v| v.user_id == story.creator_id || v.is_admin())
}

/// Create a story (POST /api/stories)
pub async fn create_story(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Json(request): Json<CreateStoryRequest>,
) -> Result<Json<StoryResponse>, ApiError> {
    let pool = state.pool()?;

    validate_title(&request.title)?;
    validate_description(&request.description)?;
    if request.max_contributors < 0 {
        return Err(ApiError::validation("maxContributors cannot be negative"));
    }

    let story = db::create_story(pool, principal.user_id, &request).await?;

    tracing::info!("Story created: {} by {}", story.id, principal.username);

    Ok(Json(StoryResponse {
        success: true,
        story,
    }))
}

/// List stories with pagination and filters (GET /api/stories)
pub async fn list_stories(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListStoriesQuery>,
) -> Result<Json<ListStoriesResponse>, ApiError> {
    let pool = state.pool()?;

    let viewer = principal_from_headers(&headers);
    let include_private = viewer.as_ref().is_some_and(|v| v.is_admin());

    let (stories, total) = db::list_stories(
        pool,
        query.genre.as_deref(),
        query.status.as_deref(),
        include_private,
        query.page,
        query.limit,
        &query.sort,
        query.order != "asc",
    )
    .await?;

    let limit = query.limit.clamp(1, 100);
    let pages = if total == 0 { 0 } else { (total + limit - 1) / limit };

    Ok(Json(ListStoriesResponse {
        success: true,
        stories,
        pagination: Pagination {
            total,
            page: query.page.max(1),
            limit,
            pages,
        },
    }))
}

/// Fetch a story by ID, incrementing its view counter (GET /api/stories/{id})
pub async fn get_story(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(story_id): Path<Uuid>,
) -> Result<Json<StoryResponse>, ApiError> {
    let pool = state.pool()?;

    let mut story = db::get_story(pool, story_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Story"))?;

    let viewer = principal_from_headers(&headers);
    if !can_view(&story, viewer.as_ref()) {
        return Err(ApiError::permission(
            "You do not have permission to view this story",
        ));
    }

    db::increment_views(pool, story_id).await?;
    story.views += 1;

    Ok(Json(StoryResponse {
        success: true,
        story,
    }))
}

/// Update a story (PUT /api/stories/{id}); creator or admin only
pub async fn update_story(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(story_id): Path<Uuid>,
    Json(request): Json<UpdateStoryRequest>,
) -> Result<Json<StoryResponse>, ApiError> {
    let pool = state.pool()?;

    let story = db::get_story(pool, story_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Story"))?;

    if !story.is_managed_by(principal.user_id, principal.is_admin()) {
        return Err(ApiError::permission(
            "You do not have permission to update this story",
        ));
    }

    if let Some(title) = &request.title {
        validate_title(title)?;
    }
    if let Some(description) = &request.description {
        validate_description(description)?;
    }

    db::update_story(pool, story_id, &request).await?;

    let story = db::get_story(pool, story_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Story"))?;

    Ok(Json(StoryResponse {
        success: true,
        story,
    }))
}

/// Delete a story and its contributions (DELETE /api/stories/{id})
pub async fn delete_story(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(story_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let pool = state.pool()?;

    let story = db::get_story(pool, story_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Story"))?;

    if !story.is_managed_by(principal.user_id, principal.is_admin()) {
        return Err(ApiError::permission(
            "You do not have permission to delete this story",
        ));
    }

    db::delete_story(pool, story_id).await?;

    tracing::info!("Story deleted: {} by {}", story_id, principal.username);

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Story deleted successfully",
    })))
}

/// Like a story (POST /api/stories/{id}/like)
pub async fn like_story(
    State(state): State<AppState>,
    Path(story_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let pool = state.pool()?;

    if db::get_story(pool, story_id).await?.is_none() {
        return Err(ApiError::not_found("Story"));
    }

    let likes = db::like_story(pool, story_id).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "likes": likes,
    })))
}

/// Platform statistics (GET /api/stories/stats)
pub async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let pool = state.pool()?;

    let stats = PlatformStats {
        stories: db::count_public_stories(pool).await?,
        writers: count_users(pool).await?,
    };

    Ok(Json(serde_json::json!({
        "success": true,
        "stats": stats,
    })))
}
