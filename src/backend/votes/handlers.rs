//! Vote HTTP Handlers
//!
//! - `POST /api/votes` - cast a vote (create / toggle-off / switch)
//! - `GET /api/votes/contribution/{id}` - list a contribution's votes
//! - `GET /api/votes/user/contribution/{id}` - the caller's vote

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::backend::contributions::db as contributions_db;
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::notifications::db::notify_quietly;
use crate::backend::server::state::AppState;
use crate::shared::event::RealtimeEvent;
use crate::shared::notification::NotificationKind;
use crate::shared::vote::{
    CastVoteRequest, CastVoteResponse, ListVotesResponse, VoteSummary, VoteTransition,
};

use super::db;

/// Cast a vote (POST /api/votes).
///
/// Self-voting is permitted; a repeated same-direction vote removes the
/// existing vote (toggle-off).
pub async fn cast_vote(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Json(request): Json<CastVoteRequest>,
) -> Result<Json<CastVoteResponse>, ApiError> {
    let pool = state.pool()?;

    let contribution = contributions_db::get_contribution(pool, request.contribution_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contribution"))?;

    let outcome = db::cast_vote(
        pool,
        contribution.id,
        contribution.story_id,
        principal.user_id,
        request.vote_type,
    )
    .await?;

    let message = match outcome.transition {
        VoteTransition::Created(_) => "Vote added successfully",
        VoteTransition::Removed(_) => "Vote removed successfully",
        VoteTransition::Switched { .. } => "Vote updated successfully",
    };

    state.rooms.broadcast(
        contribution.story_id,
        RealtimeEvent::vote_added(serde_json::json!({
            "contributionId": contribution.id,
            "storyId": contribution.story_id,
            "votes": outcome.counts,
        })),
    );

    // Only a freshly created vote notifies the author
    if matches!(outcome.transition, VoteTransition::Created(_))
        && contribution.user_id != principal.user_id
    {
        notify_quietly(
            pool,
            contribution.user_id,
            principal.user_id,
            NotificationKind::Vote,
            Some(contribution.story_id),
            Some(contribution.id),
            &format!("{} voted on your contribution", principal.username),
        )
        .await;
    }

    Ok(Json(CastVoteResponse {
        success: true,
        message: message.to_string(),
        vote: outcome.vote,
        votes: outcome.counts,
    }))
}

/// List a contribution's votes with a summary
/// (GET /api/votes/contribution/{id})
pub async fn get_contribution_votes(
    State(state): State<AppState>,
    Path(contribution_id): Path<Uuid>,
) -> Result<Json<ListVotesResponse>, ApiError> {
    let pool = state.pool()?;

    let contribution = contributions_db::get_contribution(pool, contribution_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contribution"))?;

    let votes = db::list_for_contribution(pool, contribution_id).await?;

    Ok(Json(ListVotesResponse {
        success: true,
        votes,
        summary: VoteSummary {
            upvotes: contribution.votes.upvotes,
            downvotes: contribution.votes.downvotes,
            total: contribution.votes.upvotes - contribution.votes.downvotes,
        },
    }))
}

/// The caller's vote on a contribution
/// (GET /api/votes/user/contribution/{id})
pub async fn get_user_vote(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(contribution_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let pool = state.pool()?;

    if contributions_db::get_contribution(pool, contribution_id).await?.is_none() {
        return Err(ApiError::not_found("Contribution"));
    }

    let vote = db::find_vote(pool, contribution_id, principal.user_id).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "vote": vote,
    })))
}
