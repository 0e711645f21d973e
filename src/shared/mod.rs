//! Shared Domain Types
//!
//! This module contains the domain models and wire types used across the
//! backend: stories, contributions, votes, invites, notifications, user
//! profiles, real-time events, and shared error types.
//!
//! The pure domain rules live here as well (content validation, the vote
//! transition table, the contributor-capacity rule) so that they can be
//! exercised without a database.

pub mod error;
pub mod event;
pub mod story;
pub mod contribution;
pub mod vote;
pub mod user;
pub mod invite;
pub mod notification;

// Re-export commonly used types
pub use error::SharedError;
pub use event::{EventType, RealtimeEvent};
pub use story::{Story, StoryStatus, Genre};
pub use contribution::{Contribution, ContributionStatus, Comment, VoteCounts};
pub use vote::{Vote, VoteType, VoteTransition};
pub use user::{UserProfile, UserRole};
pub use invite::{Invite, CollaboratorRole};
pub use notification::{Notification, NotificationKind};
