//! Storyloom - Main Library
//!
//! Storyloom is a collaborative storytelling backend built with Rust.
//! Users create stories, other users append contributions (story
//! continuations), the community votes on contributions, and story
//! creators designate a contribution as canonical for the main storyline.
//! A real-time layer broadcasts presence and new submissions to co-viewers
//! of a story.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Domain models and wire types
//!   - Story, contribution, vote, invite and notification structures
//!   - Pure domain rules (content validation, vote transitions, capacity)
//!   - Real-time event types
//!   - Error types
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server with JSON API handlers
//!   - Contribution and voting engine over PostgreSQL
//!   - Authentication, JWT sessions, role-based permissions
//!   - Per-story real-time broadcasting and presence over SSE
//!
//! # Usage
//!
//! ```rust,no_run
//! use storyloom::backend::server::init::create_app;
//!
//! # async fn example() {
//! let app = create_app().await;
//! // Use app with Axum server
//! # }
//! ```

pub mod shared;
pub mod backend;
