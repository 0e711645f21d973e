//! Real-time Update System
//!
//! Story rooms broadcast events (new contributions, votes, comments,
//! presence, typing) to co-viewers over Server-Sent Events. Each story
//! gets its own `tokio::sync::broadcast` channel, created lazily and
//! cleaned up when the last subscriber disconnects.

/// Per-story broadcast channels
pub mod broadcast;

/// Active-user tracking per story
pub mod presence;

/// SSE subscription handler
pub mod subscription;

/// Presence and typing endpoints
pub mod handlers;

pub use broadcast::StoryRooms;
pub use presence::{ActiveUser, PresenceRegistry};
pub use subscription::handle_story_subscription;
