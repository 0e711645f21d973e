//! Authentication Module
//!
//! JWT session tokens, bcrypt password storage, and the user table
//! operations. Handlers live under `handlers/`; the middleware that
//! attaches the authenticated principal to requests is in
//! `crate::backend::middleware::auth`.

/// Signup, login and profile handlers
pub mod handlers;

/// JWT token creation and verification
pub mod sessions;

/// User database operations
pub mod users;

pub use sessions::{create_token, verify_token, Claims};
pub use users::User;
