//! Backend Error Module
//!
//! This module defines the error taxonomy used by all HTTP handlers and
//! the database layer, and the conversion into HTTP responses.
//!
//! # Module Structure
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - Error conversion implementations (IntoResponse)
//!
//! # Error Taxonomy
//!
//! - `Validation` - malformed or out-of-range input (400)
//! - `NotFound` - referenced entity absent (404)
//! - `Permission` - actor lacks required role or ownership (403)
//! - `InvalidState` - operation not allowed in the entity's current state (400)
//! - `Capacity` - contributor limit reached (400)
//! - `Unauthorized` - missing or invalid credentials (401)
//! - `Database` / `Internal` - storage or server failures (500), details
//!   logged but never leaked to clients
//! - `Unavailable` - database not configured (503)

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::ApiError;
