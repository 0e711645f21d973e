//! Collaborator Invite HTTP Handlers
//!
//! - `POST /api/collaborators/invite` - issue an invite for an email
//! - `POST /api/collaborators/accept` - redeem an invite token

use axum::{extract::State, Json};

use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::stories::db as stories_db;
use crate::shared::invite::{AcceptInviteRequest, InviteCollaboratorRequest, InviteResponse};

use super::db;

/// Issue an invite (POST /api/collaborators/invite); story creator or
/// admin only.
///
/// The token is returned in the response so development clients can
/// exercise acceptance without an email delivery path.
pub async fn invite_collaborator(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Json(request): Json<InviteCollaboratorRequest>,
) -> Result<Json<InviteResponse>, ApiError> {
    let pool = state.pool()?;

    if !request.email.contains('@') {
        return Err(ApiError::validation("Please add a valid email"));
    }
    let email = request.email.trim().to_lowercase();

    let story = stories_db::get_story(pool, request.story_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Story"))?;

    if !story.is_managed_by(principal.user_id, principal.is_admin()) {
        return Err(ApiError::permission(
            "You do not have permission to invite collaborators",
        ));
    }

    // An invite for the creator's own address is meaningless
    if let Some(invitee) = get_user_by_email(pool, &email).await? {
        if invitee.id == story.creator_id {
            return Err(ApiError::validation("User is the creator of the story"));
        }
        if db::is_collaborator(pool, story.id, invitee.id).await? {
            return Err(ApiError::validation("User is already a collaborator"));
        }
    }

    if db::find_invite(pool, &email, story.id).await?.is_some() {
        return Err(ApiError::validation("Invite already sent to this email"));
    }

    let invite = db::create_invite(pool, story.id, principal.user_id, &email, request.role).await?;

    tracing::info!("Invite issued for {} to story {}", invite.email, story.id);

    Ok(Json(InviteResponse {
        success: true,
        email: invite.email,
        role: invite.role,
        token: invite.token,
    }))
}

/// Accept an invite token (POST /api/collaborators/accept).
///
/// The logged-in email must match the invited address. Acceptance is
/// idempotent on the collaborator set and consumes the invite.
pub async fn accept_invite(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Json(request): Json<AcceptInviteRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let pool = state.pool()?;

    let invite = db::find_valid_invite_by_token(pool, &request.token)
        .await?
        .ok_or_else(|| ApiError::validation("Invalid or expired invite token"))?;

    if !principal.email.eq_ignore_ascii_case(&invite.email) {
        return Err(ApiError::permission(
            "This invite is for a different email address",
        ));
    }

    let story = stories_db::get_story(pool, invite.story_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Story"))?;

    db::add_collaborator(pool, story.id, principal.user_id, invite.role).await?;
    db::delete_invite(pool, invite.id).await?;

    tracing::info!(
        "{} joined story {} as {}",
        principal.username,
        story.id,
        invite.role.as_str()
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Invite accepted successfully",
        "storyId": story.id,
        "role": invite.role,
    })))
}
