/**
 * Real-time Event System
 *
 * This module defines the event types broadcast into story rooms. Events
 * represent the different kinds of updates co-viewers of a story receive:
 * new contributions, votes, comments, the active-user roster, typing
 * indicators and notifications.
 */
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Type of real-time event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    /// A new contribution was submitted to the story
    ContributionAdded,
    /// A vote was cast, changed, or removed on a contribution
    VoteAdded,
    /// A comment was attached to a contribution
    CommentAdded,
    /// The full roster of users currently viewing the story
    ActiveUsers,
    /// A user started typing a contribution
    UserTyping,
    /// A user stopped typing
    UserStopTyping,
    /// A user notification
    Notification,
}

/// Real-time event broadcast to all subscribers of a story room
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RealtimeEvent {
    /// Type of event
    pub event_type: EventType,
    /// Event payload (JSON-serializable data)
    pub payload: serde_json::Value,
    /// Timestamp when the event occurred (RFC 3339)
    pub timestamp: String,
}

impl RealtimeEvent {
    /// Create a new real-time event
    pub fn new(event_type: EventType, payload: serde_json::Value) -> Self {
        Self {
            event_type,
            payload,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Create a contribution-added event
    pub fn contribution_added(contribution: serde_json::Value) -> Self {
        Self::new(EventType::ContributionAdded, contribution)
    }

    /// Create a vote-added event
    pub fn vote_added(vote: serde_json::Value) -> Self {
        Self::new(EventType::VoteAdded, vote)
    }

    /// Create a comment-added event
    pub fn comment_added(comment: serde_json::Value) -> Self {
        Self::new(EventType::CommentAdded, comment)
    }

    /// Create an active-users roster event
    pub fn active_users(users: serde_json::Value) -> Self {
        Self::new(EventType::ActiveUsers, users)
    }

    /// Create a typing indicator event
    pub fn typing(user_id: uuid::Uuid, username: &str, is_typing: bool) -> Self {
        let event_type = if is_typing {
            EventType::UserTyping
        } else {
            EventType::UserStopTyping
        };
        Self::new(
            event_type,
            serde_json::json!({
                "userId": user_id,
                "username": username,
            }),
        )
    }

    /// Create a notification event
    pub fn notification(title: String, message: String) -> Self {
        Self::new(
            EventType::Notification,
            serde_json::json!({
                "title": title,
                "message": message,
            }),
        )
    }

    /// SSE event name for this event, matching the wire names clients
    /// subscribe to
    pub fn sse_event_name(&self) -> &'static str {
        match self.event_type {
            EventType::ContributionAdded => "contribution-added",
            EventType::VoteAdded => "vote-added",
            EventType::CommentAdded => "comment-added",
            EventType::ActiveUsers => "active-users",
            EventType::UserTyping => "user-typing",
            EventType::UserStopTyping => "user-stop-typing",
            EventType::Notification => "notification",
        }
    }
}
