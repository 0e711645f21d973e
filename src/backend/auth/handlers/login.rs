/**
 * Login Handler
 *
 * This module implements the user login handler for POST /api/auth/login.
 * Credentials are verified against the stored bcrypt hash; a JWT token is
 * returned on success. The same error is returned for an unknown email
 * and a wrong password.
 */

use axum::{extract::State, response::Json};
use bcrypt::verify;
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::ApiError;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - unknown email or wrong password
/// * `503 Service Unavailable` - database not configured
pub async fn login(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    tracing::info!("Login request for email: {}", request.email);

    let user = get_user_by_email(&pool, &request.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    let valid = verify(&request.password, &user.password_hash)
        .map_err(|e| ApiError::internal(format!("Password verification failed: {}", e)))?;

    if !valid {
        tracing::warn!("Failed login attempt for email: {}", request.email);
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let token = create_token(user.id, &user.username, &user.email, user.role)
        .map_err(|e| ApiError::internal(format!("Failed to create token: {}", e)))?;

    Ok(Json(AuthResponse {
        token,
        user: UserResponse {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            role: user.role.as_str().to_string(),
        },
    }))
}
