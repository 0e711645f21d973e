//! Authentication HTTP Handlers
//!
//! - `POST /api/auth/signup` - user registration
//! - `POST /api/auth/login` - user login
//! - `GET /api/auth/me` - current user profile

pub mod login;
pub mod me;
pub mod signup;
pub mod types;

pub use login::login;
pub use me::me;
pub use signup::signup;
