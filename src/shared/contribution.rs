//! Contribution Data Structures
//!
//! A contribution is a continuation appended to a story. Contributions
//! carry an append-only `position` sequence per story, denormalized vote
//! counters, an append-only comment list, and the `is_selected` flag the
//! story creator uses to mark the canonical continuation at a position.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Minimum accepted contribution length in characters
pub const MIN_CONTENT_LEN: usize = 10;
/// Maximum accepted contribution length in characters
pub const MAX_CONTENT_LEN: usize = 5000;
/// Maximum accepted comment length in characters
pub const MAX_COMMENT_LEN: usize = 500;

/// Moderation status of a contribution
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContributionStatus {
    Pending,
    Approved,
    Rejected,
    Draft,
}

impl ContributionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContributionStatus::Pending => "pending",
            ContributionStatus::Approved => "approved",
            ContributionStatus::Rejected => "rejected",
            ContributionStatus::Draft => "draft",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ContributionStatus::Pending),
            "approved" => Some(ContributionStatus::Approved),
            "rejected" => Some(ContributionStatus::Rejected),
            "draft" => Some(ContributionStatus::Draft),
            _ => None,
        }
    }
}

/// Denormalized vote counters kept consistent with the vote set
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteCounts {
    pub upvotes: i64,
    pub downvotes: i64,
}

/// A comment attached to a contribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment ID
    pub id: Uuid,
    /// The contribution this comment belongs to
    pub contribution_id: Uuid,
    /// Comment author
    pub user_id: Uuid,
    /// Comment text (trimmed, at most 500 characters)
    pub text: String,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
}

/// Represents a story contribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contribution {
    /// Unique contribution ID
    pub id: Uuid,
    /// The story this contribution belongs to
    pub story_id: Uuid,
    /// Contribution author
    pub user_id: Uuid,
    /// Contribution text
    pub content: String,
    /// Moderation status
    pub status: ContributionStatus,
    /// Position in the story's append sequence (1-based, never reused)
    pub position: i32,
    /// Optional parent contribution for branching narratives
    pub parent_id: Option<Uuid>,
    /// Whether this contribution is part of the main storyline
    pub is_selected: bool,
    /// Vote counters
    pub votes: VoteCounts,
    /// When the contribution was created
    pub created_at: DateTime<Utc>,
    /// When the contribution was last updated
    pub updated_at: DateTime<Utc>,
}

/// Validate contribution content length (10-5000 characters)
pub fn validate_content(content: &str) -> Result<(), SharedError> {
    let len = content.chars().count();
    if !(MIN_CONTENT_LEN..=MAX_CONTENT_LEN).contains(&len) {
        return Err(SharedError::validation(
            "content",
            "Content must be between 10 and 5000 characters",
        ));
    }
    Ok(())
}

/// Validate and normalize comment text.
///
/// Returns the trimmed text; comments must be non-empty after trimming and
/// at most 500 characters.
pub fn validate_comment_text(text: &str) -> Result<String, SharedError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SharedError::validation("text", "Comment text is required"));
    }
    if trimmed.chars().count() > MAX_COMMENT_LEN {
        return Err(SharedError::validation(
            "text",
            "Comment cannot exceed 500 characters",
        ));
    }
    Ok(trimmed.to_string())
}

/// Sort field accepted when listing contributions.
///
/// Only whitelisted columns are admitted; anything else falls back to
/// position order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributionSort {
    Position,
    CreatedAt,
    Upvotes,
}

impl ContributionSort {
    pub fn parse(s: &str) -> Self {
        match s {
            "createdAt" | "created_at" => ContributionSort::CreatedAt,
            "votes" | "upvotes" => ContributionSort::Upvotes,
            _ => ContributionSort::Position,
        }
    }

    /// Column name used in ORDER BY clauses
    pub fn column(&self) -> &'static str {
        match self {
            ContributionSort::Position => "position",
            ContributionSort::CreatedAt => "created_at",
            ContributionSort::Upvotes => "upvotes",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Self {
        match s {
            "desc" => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Request body for submitting a contribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContributionRequest {
    pub story_id: Uuid,
    pub content: String,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

/// Request body for updating a contribution; absent fields are unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateContributionRequest {
    pub content: Option<String>,
    pub status: Option<ContributionStatus>,
}

/// Request body for attaching a comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCommentRequest {
    pub text: String,
}

/// Response type for a single contribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionResponse {
    pub success: bool,
    pub contribution: Contribution,
}

/// Response type for listing a story's contributions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListContributionsResponse {
    pub success: bool,
    pub contributions: Vec<Contribution>,
}

/// Response type for an attached comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub success: bool,
    pub comment: Comment,
}
