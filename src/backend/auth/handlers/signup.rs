/**
 * Signup Handler
 *
 * This module implements the user registration handler for
 * POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate username, email format and password length
 * 2. Check username and email uniqueness
 * 3. Hash password using bcrypt
 * 4. Create user in database
 * 5. Generate JWT token
 * 6. Return token and user info
 *
 * # Security
 *
 * - Passwords are hashed using bcrypt with DEFAULT_COST
 * - Passwords are never returned in responses
 * - JWT tokens are generated with 30-day expiration
 */

use axum::{extract::State, response::Json};
use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest, UserResponse};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{create_user, get_user_by_email, get_user_by_username};
use crate::backend::error::ApiError;

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    // First character must be a letter
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    // Rest can be alphanumeric or underscore
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - invalid username, email format or short password
/// * `400 Bad Request` - username or email already taken
/// * `503 Service Unavailable` - database not configured
pub async fn signup(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    tracing::info!("Signup request for username: {}", request.username);

    if !is_valid_username(&request.username) {
        return Err(ApiError::validation(
            "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
        ));
    }

    if !request.email.contains('@') {
        return Err(ApiError::validation("Invalid email format"));
    }

    if request.password.len() < 8 {
        return Err(ApiError::validation("Password must be at least 8 characters"));
    }

    if get_user_by_username(&pool, &request.username).await?.is_some() {
        return Err(ApiError::validation("Username already taken"));
    }

    if get_user_by_email(&pool, &request.email).await?.is_some() {
        return Err(ApiError::validation("Email already registered"));
    }

    let password_hash = hash(&request.password, DEFAULT_COST)
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {}", e)))?;

    let user = create_user(&pool, request.username, request.email, password_hash).await?;

    let token = create_token(user.id, &user.username, &user.email, user.role)
        .map_err(|e| ApiError::internal(format!("Failed to create token: {}", e)))?;

    tracing::info!("User created successfully: {}", user.username);

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(is_valid_username("alice"));
        assert!(is_valid_username("alice_b99"));
        assert!(is_valid_username("Abc"));
    }

    #[test]
    fn test_invalid_usernames() {
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("9lives"));
        assert!(!is_valid_username("_underscore"));
        assert!(!is_valid_username("has space"));
        assert!(!is_valid_username(&"a".repeat(31)));
    }
}
