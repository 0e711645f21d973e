/**
 * API Route Configuration
 *
 * This module wires the `/api` endpoints. Routes split into two groups:
 *
 * - **Public** routes, where authentication is absent or optional (story
 *   listing and fetching check the bearer token themselves to decide
 *   private-story visibility).
 * - **Protected** routes behind the auth middleware, which rejects
 *   requests without a valid bearer token before the handler runs.
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::auth::handlers::{login, me, signup};
use crate::backend::collaborators::handlers as collaborators;
use crate::backend::contributions::handlers as contributions;
use crate::backend::middleware::auth::auth_middleware;
use crate::backend::notifications::handlers as notifications;
use crate::backend::realtime::handlers as realtime;
use crate::backend::realtime::subscription::handle_story_subscription;
use crate::backend::server::state::AppState;
use crate::backend::stories::handlers as stories;
use crate::backend::votes::handlers as votes;

/// Routes reachable without a token
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/stories", get(stories::list_stories))
        .route("/api/stories/stats", get(stories::get_stats))
        .route("/api/stories/{id}", get(stories::get_story))
        .route("/api/stories/{id}/like", post(stories::like_story))
        .route("/api/stories/{id}/events", get(handle_story_subscription))
        .route(
            "/api/contributions/story/{story_id}",
            get(contributions::list_story_contributions),
        )
        .route("/api/contributions/{id}", get(contributions::get_contribution))
        .route(
            "/api/contributions/{id}/comments",
            get(contributions::list_comments),
        )
        .route(
            "/api/votes/contribution/{id}",
            get(votes::get_contribution_votes),
        )
}

/// Routes behind the auth middleware
fn protected_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/stories", post(stories::create_story))
        .route("/api/stories/{id}", put(stories::update_story))
        .route("/api/stories/{id}", delete(stories::delete_story))
        .route("/api/stories/{id}/presence", post(realtime::handle_presence))
        .route("/api/stories/{id}/typing", post(realtime::handle_typing))
        .route("/api/contributions", post(contributions::submit_contribution))
        .route(
            "/api/contributions/{id}",
            put(contributions::update_contribution),
        )
        .route(
            "/api/contributions/{id}",
            delete(contributions::delete_contribution),
        )
        .route(
            "/api/contributions/{id}/comments",
            post(contributions::add_comment),
        )
        .route(
            "/api/contributions/{id}/select",
            post(contributions::select_contribution),
        )
        .route("/api/votes", post(votes::cast_vote))
        .route(
            "/api/votes/user/contribution/{id}",
            get(votes::get_user_vote),
        )
        .route(
            "/api/collaborators/invite",
            post(collaborators::invite_collaborator),
        )
        .route("/api/collaborators/accept", post(collaborators::accept_invite))
        .route("/api/notifications", get(notifications::list_notifications))
        .route("/api/notifications/read-all", put(notifications::mark_all_read))
        .route("/api/notifications/{id}/read", put(notifications::mark_read))
        .layer(from_fn_with_state(app_state, auth_middleware))
}

/// Configure all API routes on the given router
pub fn configure_api_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    router
        .merge(public_routes())
        .merge(protected_routes(app_state))
}
