/**
 * Current User Handler
 *
 * This module implements GET /api/auth/me, returning the authenticated
 * user's profile. The principal comes from the auth middleware.
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;

/// Current user handler
///
/// # Errors
///
/// * `404 Not Found` - the token's user no longer exists
/// * `503 Service Unavailable` - database not configured
pub async fn me(
    State(pool): State<Option<PgPool>>,
    AuthUser(principal): AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;

    let user = get_user_by_id(&pool, principal.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

    Ok(Json(UserResponse {
        id: user.id.to_string(),
        username: user.username,
        email: user.email,
        role: user.role.as_str().to_string(),
    }))
}
