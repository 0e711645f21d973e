//! Request Middleware
//!
//! Middleware applied to protected routes. Currently authentication only.

/// Authentication middleware and the `AuthUser` extractor
pub mod auth;

pub use auth::{AuthUser, AuthenticatedUser};
