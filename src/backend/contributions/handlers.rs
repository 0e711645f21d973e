//! Contribution HTTP Handlers
//!
//! The submission endpoint enforces the full admission gate (content
//! length, story existence, active status, contributor capacity) before
//! writing. After a successful write, handlers broadcast into the story
//! room and fan out notifications; neither can fail the request.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::backend::middleware::auth::{principal_from_headers, AuthUser, AuthenticatedUser};
use crate::backend::notifications::db::notify_quietly;
use crate::backend::server::state::AppState;
use crate::backend::stories::db as stories_db;
use crate::shared::contribution::{
    validate_comment_text, validate_content, AddCommentRequest, CommentResponse,
    ContributionResponse, ContributionSort, CreateContributionRequest, ListContributionsResponse,
    SortOrder, UpdateContributionRequest,
};
use crate::shared::event::RealtimeEvent;
use crate::shared::notification::NotificationKind;
use crate::shared::story::{ContributionGate, Story};

use super::db;

/// Query parameters for listing a story's contributions
#[derive(Debug, Deserialize)]
pub struct ListContributionsQuery {
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
}

/// Whether `viewer` may see contributions of `story`
fn can_view(story: &Story, viewer: Option<&AuthenticatedUser>) -> bool {
    if !story.is_private {
        return true;
    }
    viewer.is_some_and(|v| v.user_id == story.creator_id || v.is_admin())
}

/// Submit a contribution (POST /api/contributions)
pub async fn submit_contribution(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Json(request): Json<CreateContributionRequest>,
) -> Result<Json<ContributionResponse>, ApiError> {
    let pool = state.pool()?;

    validate_content(&request.content)?;

    let story = stories_db::get_story(pool, request.story_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Story"))?;

    match story.contribution_gate(principal.user_id) {
        ContributionGate::Open => {}
        ContributionGate::StoryNotActive => {
            return Err(ApiError::invalid_state(
                "Cannot contribute to a completed or archived story",
            ));
        }
        ContributionGate::ContributorLimitReached => {
            return Err(ApiError::capacity(
                "Maximum number of contributors reached for this story",
            ));
        }
    }

    let contribution = db::create_contribution(
        pool,
        request.story_id,
        principal.user_id,
        &request.content,
        request.parent_id,
    )
    .await?;

    tracing::info!(
        "Contribution {} added to story {} at position {}",
        contribution.id,
        contribution.story_id,
        contribution.position
    );

    // Fan-out after the write: room broadcast and creator notification are
    // fire-and-forget
    state.rooms.broadcast(
        story.id,
        RealtimeEvent::contribution_added(serde_json::json!({
            "contribution": contribution,
            "username": principal.username,
        })),
    );

    if story.creator_id != principal.user_id {
        notify_quietly(
            pool,
            story.creator_id,
            principal.user_id,
            NotificationKind::Contribution,
            Some(story.id),
            Some(contribution.id),
            &format!("{} added a contribution to \"{}\"", principal.username, story.title),
        )
        .await;
    }

    Ok(Json(ContributionResponse {
        success: true,
        contribution,
    }))
}

/// List a story's contributions (GET /api/contributions/story/{storyId})
pub async fn list_story_contributions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(story_id): Path<Uuid>,
    Query(query): Query<ListContributionsQuery>,
) -> Result<Json<ListContributionsResponse>, ApiError> {
    let pool = state.pool()?;

    let story = stories_db::get_story(pool, story_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Story"))?;

    let viewer = principal_from_headers(&headers);
    if !can_view(&story, viewer.as_ref()) {
        return Err(ApiError::permission(
            "You do not have permission to view this story's contributions",
        ));
    }

    let sort = ContributionSort::parse(query.sort.as_deref().unwrap_or("position"));
    let order = SortOrder::parse(query.order.as_deref().unwrap_or("asc"));

    let contributions = db::list_for_story(pool, story_id, sort, order).await?;

    Ok(Json(ListContributionsResponse {
        success: true,
        contributions,
    }))
}

/// Fetch a single contribution (GET /api/contributions/{id})
pub async fn get_contribution(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(contribution_id): Path<Uuid>,
) -> Result<Json<ContributionResponse>, ApiError> {
    let pool = state.pool()?;

    let contribution = db::get_contribution(pool, contribution_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contribution"))?;

    let story = stories_db::get_story(pool, contribution.story_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Story"))?;

    let viewer = principal_from_headers(&headers);
    if !can_view(&story, viewer.as_ref()) {
        return Err(ApiError::permission(
            "You do not have permission to view this contribution",
        ));
    }

    Ok(Json(ContributionResponse {
        success: true,
        contribution,
    }))
}

/// Update a contribution (PUT /api/contributions/{id}); author or admin.
///
/// Status changes are applied only for admins; non-admin requests
/// carrying a status are otherwise honored for their content change, as
/// the update is author-scoped.
pub async fn update_contribution(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(contribution_id): Path<Uuid>,
    Json(request): Json<UpdateContributionRequest>,
) -> Result<Json<ContributionResponse>, ApiError> {
    let pool = state.pool()?;

    let contribution = db::get_contribution(pool, contribution_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contribution"))?;

    if contribution.user_id != principal.user_id && !principal.is_admin() {
        return Err(ApiError::permission(
            "You do not have permission to update this contribution",
        ));
    }

    if let Some(content) = &request.content {
        validate_content(content)?;
    }

    let status = if principal.is_admin() { request.status } else { None };

    db::update_contribution(pool, contribution_id, request.content.as_deref(), status).await?;

    let contribution = db::get_contribution(pool, contribution_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contribution"))?;

    Ok(Json(ContributionResponse {
        success: true,
        contribution,
    }))
}

/// Delete a contribution (DELETE /api/contributions/{id}); author or admin.
///
/// Sibling positions are not renumbered; the gap is intentional.
pub async fn delete_contribution(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(contribution_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let pool = state.pool()?;

    let contribution = db::get_contribution(pool, contribution_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contribution"))?;

    if contribution.user_id != principal.user_id && !principal.is_admin() {
        return Err(ApiError::permission(
            "You do not have permission to delete this contribution",
        ));
    }

    db::delete_contribution(pool, contribution_id).await?;

    tracing::info!("Contribution {} deleted by {}", contribution_id, principal.username);

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Contribution deleted successfully",
    })))
}

/// Attach a comment (POST /api/contributions/{id}/comments).
///
/// Comments are accepted regardless of the story's status.
pub async fn add_comment(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(contribution_id): Path<Uuid>,
    Json(request): Json<AddCommentRequest>,
) -> Result<Json<CommentResponse>, ApiError> {
    let pool = state.pool()?;

    let text = validate_comment_text(&request.text)?;

    let contribution = db::get_contribution(pool, contribution_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contribution"))?;

    let comment = db::add_comment(pool, contribution_id, principal.user_id, &text).await?;

    state.rooms.broadcast(
        contribution.story_id,
        RealtimeEvent::comment_added(serde_json::json!({
            "comment": comment,
            "username": principal.username,
        })),
    );

    if contribution.user_id != principal.user_id {
        notify_quietly(
            pool,
            contribution.user_id,
            principal.user_id,
            NotificationKind::Comment,
            Some(contribution.story_id),
            Some(contribution.id),
            &format!("{} commented on your contribution", principal.username),
        )
        .await;
    }

    Ok(Json(CommentResponse {
        success: true,
        comment,
    }))
}

/// List a contribution's comments (GET /api/contributions/{id}/comments)
pub async fn list_comments(
    State(state): State<AppState>,
    Path(contribution_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let pool = state.pool()?;

    if db::get_contribution(pool, contribution_id).await?.is_none() {
        return Err(ApiError::not_found("Contribution"));
    }

    let comments = db::list_comments(pool, contribution_id).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "comments": comments,
    })))
}

/// Select a contribution for the main storyline
/// (POST /api/contributions/{id}/select); story creator or admin only.
pub async fn select_contribution(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(contribution_id): Path<Uuid>,
) -> Result<Json<ContributionResponse>, ApiError> {
    let pool = state.pool()?;

    let contribution = db::get_contribution(pool, contribution_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contribution"))?;

    let story = stories_db::get_story(pool, contribution.story_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Story"))?;

    if !story.is_managed_by(principal.user_id, principal.is_admin()) {
        return Err(ApiError::permission(
            "Only the story creator can select contributions for the main storyline",
        ));
    }

    let contribution = db::select_contribution(pool, &contribution).await?;

    tracing::info!(
        "Contribution {} selected at position {} in story {}",
        contribution.id,
        contribution.position,
        story.id
    );

    Ok(Json(ContributionResponse {
        success: true,
        contribution,
    }))
}
