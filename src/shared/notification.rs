//! Notification Types
//!
//! Notifications record activity fan-out: a contribution on your story, a
//! vote or comment on your contribution. They are written after the
//! triggering operation succeeds and never fail it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What triggered a notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Contribution,
    Vote,
    Comment,
    Follow,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Contribution => "contribution",
            NotificationKind::Vote => "vote",
            NotificationKind::Comment => "comment",
            NotificationKind::Follow => "follow",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "contribution" => Some(NotificationKind::Contribution),
            "vote" => Some(NotificationKind::Vote),
            "comment" => Some(NotificationKind::Comment),
            "follow" => Some(NotificationKind::Follow),
            _ => None,
        }
    }
}

/// Represents a stored notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub sender_id: Uuid,
    pub kind: NotificationKind,
    pub story_id: Option<Uuid>,
    pub contribution_id: Option<Uuid>,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Response type for listing notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListNotificationsResponse {
    pub success: bool,
    pub results: usize,
    pub unread_count: i64,
    pub notifications: Vec<Notification>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in [
            NotificationKind::Contribution,
            NotificationKind::Vote,
            NotificationKind::Comment,
            NotificationKind::Follow,
        ] {
            assert_eq!(NotificationKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(NotificationKind::from_str("mention"), None);
    }
}
