//! Collaborator Invite Types
//!
//! Invites let a story creator bring collaborators in by email. An invite
//! carries a random token and expires after seven days; accepting it adds
//! the user to the story's collaborator set with the invited role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role granted by an invite
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CollaboratorRole {
    Editor,
    Contributor,
    Viewer,
}

impl CollaboratorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollaboratorRole::Editor => "editor",
            CollaboratorRole::Contributor => "contributor",
            CollaboratorRole::Viewer => "viewer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "editor" => Some(CollaboratorRole::Editor),
            "contributor" => Some(CollaboratorRole::Contributor),
            "viewer" => Some(CollaboratorRole::Viewer),
            _ => None,
        }
    }
}

impl Default for CollaboratorRole {
    fn default() -> Self {
        CollaboratorRole::Contributor
    }
}

/// Represents a pending collaborator invite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invite {
    pub id: Uuid,
    pub email: String,
    pub story_id: Uuid,
    pub invited_by: Uuid,
    pub role: CollaboratorRole,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Invite {
    /// Whether the invite can still be accepted at `now`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Request body for issuing an invite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteCollaboratorRequest {
    pub story_id: Uuid,
    pub email: String,
    #[serde(default)]
    pub role: CollaboratorRole,
}

/// Request body for accepting an invite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptInviteRequest {
    pub token: String,
}

/// Response type for an issued invite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteResponse {
    pub success: bool,
    pub email: String,
    pub role: CollaboratorRole,
    /// Returned so development clients can exercise acceptance without an
    /// email delivery path
    pub token: String,
}
