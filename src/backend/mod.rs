//! Backend Module
//!
//! This module contains all server-side code for the Storyloom
//! application: an Axum HTTP server exposing the story, contribution,
//! voting, collaborator and notification APIs, with per-story real-time
//! fan-out over Server-Sent Events.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Authentication, JWT tokens, user management
//! - **`stories`** - Story CRUD, likes, views, platform stats
//! - **`contributions`** - The contribution engine: submission, sequencing,
//!   comments, selection
//! - **`votes`** - The three-way voting state machine
//! - **`collaborators`** - Invite issuance and acceptance
//! - **`notifications`** - Activity fan-out storage and read tracking
//! - **`realtime`** - Story-room event broadcasting, presence, SSE
//! - **`middleware`** - Request processing middleware
//! - **`error`** - Backend error types
//!
//! # State Management
//!
//! The backend uses shared state (`AppState`) containing the database
//! pool, the per-story broadcast registry, and the presence registry.
//! State is shared across handlers using `Arc`; broadcast channels use
//! `tokio::sync::broadcast` for multi-subscriber messaging.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, ApiError>`; the error type maps each kind
//! in the taxonomy (validation, not-found, permission, invalid-state,
//! capacity) to an HTTP status and a JSON body.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Story management
pub mod stories;

/// Contribution engine
pub mod contributions;

/// Voting engine
pub mod votes;

/// Collaborator invites
pub mod collaborators;

/// Notification storage
pub mod notifications;

/// Real-time update system
pub mod realtime;

/// Re-export commonly used types
pub use error::ApiError;
pub use realtime::broadcast::StoryRooms;
pub use server::state::AppState;
