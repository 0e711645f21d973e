/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies JWT tokens from the
 * Authorization header and provides the authenticated principal to
 * handlers.
 */

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::verify_token;
use crate::backend::server::state::AppState;
use crate::shared::user::UserRole;

/// Authenticated principal extracted from a JWT token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    /// Whether this principal carries the administrative role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the JWT token from the Authorization header
/// 2. Verifies the token
/// 3. Attaches the principal to request extensions for use in handlers
///
/// Returns 401 Unauthorized if the token is missing or invalid.
pub async fn auth_middleware(
    State(_app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let principal = principal_from_headers(request.headers()).ok_or(StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

/// Derive the principal from request headers, if a valid bearer token is
/// present.
///
/// Used by the middleware for protected routes and directly by handlers
/// on optionally-authenticated routes (story listing, private story
/// visibility checks).
pub fn principal_from_headers(headers: &axum::http::HeaderMap) -> Option<AuthenticatedUser> {
    let auth_header = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok())?;

    let token = auth_header.strip_prefix("Bearer ")?;

    let claims = match verify_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!("Invalid token: {:?}", e);
            return None;
        }
    };

    let user_id = match Uuid::parse_str(&claims.sub) {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Invalid user ID in token: {:?}", e);
            return None;
        }
    };

    let role = claims.user_role();
    Some(AuthenticatedUser {
        user_id,
        username: claims.username,
        email: claims.email,
        role,
    })
}

/// Axum extractor for the authenticated principal
///
/// Used as a handler parameter on routes behind `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                StatusCode::UNAUTHORIZED
            })?;

        Ok(AuthUser(user))
    }
}
