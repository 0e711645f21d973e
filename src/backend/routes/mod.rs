//! Route Configuration
//!
//! Router assembly for all HTTP endpoints.

/// API route configuration
pub mod api_routes;

/// Main router creation
pub mod router;

pub use router::create_router;
