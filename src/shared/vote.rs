//! Vote Data Structures and Transition Rules
//!
//! A user holds at most one vote per contribution. Casting a vote resolves
//! through a three-way transition keyed on the user's existing vote:
//!
//! | Existing vote | Requested | Result |
//! |---|---|---|
//! | none | X | vote created, X-count +1 |
//! | X | X | vote removed (toggle-off), X-count -1 |
//! | X | Y | vote switched, X-count -1, Y-count +1 |
//!
//! The resolution is a pure function here; the database layer applies the
//! resulting writes in a single transaction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::contribution::VoteCounts;

/// Direction of a vote
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Upvote,
    Downvote,
}

impl VoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::Upvote => "upvote",
            VoteType::Downvote => "downvote",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "upvote" => Some(VoteType::Upvote),
            "downvote" => Some(VoteType::Downvote),
            _ => None,
        }
    }
}

/// Represents a user's vote on a contribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    /// Unique vote ID
    pub id: Uuid,
    /// The contribution voted on
    pub contribution_id: Uuid,
    /// The story the contribution belongs to
    pub story_id: Uuid,
    /// The voting user
    pub user_id: Uuid,
    /// Vote direction
    pub vote_type: VoteType,
    /// When the vote was first cast
    pub created_at: DateTime<Utc>,
    /// When the vote direction last changed
    pub updated_at: DateTime<Utc>,
}

/// Resolved outcome of casting a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTransition {
    /// No existing vote: create one with the requested direction
    Created(VoteType),
    /// Existing vote matches the request: remove it (toggle-off)
    Removed(VoteType),
    /// Existing vote differs: switch direction
    Switched { from: VoteType, to: VoteType },
}

impl VoteTransition {
    /// Resolve the three-way transition for a requested vote given the
    /// user's existing vote on the contribution.
    pub fn resolve(existing: Option<VoteType>, requested: VoteType) -> Self {
        match existing {
            None => VoteTransition::Created(requested),
            Some(current) if current == requested => VoteTransition::Removed(current),
            Some(current) => VoteTransition::Switched {
                from: current,
                to: requested,
            },
        }
    }

    /// Counter deltas `(upvotes, downvotes)` this transition applies to
    /// the contribution.
    pub fn deltas(&self) -> (i64, i64) {
        match self {
            VoteTransition::Created(VoteType::Upvote) => (1, 0),
            VoteTransition::Created(VoteType::Downvote) => (0, 1),
            VoteTransition::Removed(VoteType::Upvote) => (-1, 0),
            VoteTransition::Removed(VoteType::Downvote) => (0, -1),
            VoteTransition::Switched { from: VoteType::Upvote, .. } => (-1, 1),
            VoteTransition::Switched { from: VoteType::Downvote, .. } => (1, -1),
        }
    }

    /// Apply this transition's deltas to a counter pair
    pub fn apply(&self, counts: VoteCounts) -> VoteCounts {
        let (du, dd) = self.deltas();
        VoteCounts {
            upvotes: counts.upvotes + du,
            downvotes: counts.downvotes + dd,
        }
    }
}

/// Request body for casting a vote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastVoteRequest {
    pub contribution_id: Uuid,
    pub vote_type: VoteType,
}

/// Response type for a cast vote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastVoteResponse {
    pub success: bool,
    pub message: String,
    /// The vote after the transition; absent when the vote was removed
    pub vote: Option<Vote>,
    /// The contribution's counters after the transition
    pub votes: VoteCounts,
}

/// Summary returned when listing a contribution's votes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteSummary {
    pub upvotes: i64,
    pub downvotes: i64,
    pub total: i64,
}

/// Response type for listing a contribution's votes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListVotesResponse {
    pub success: bool,
    pub votes: Vec<Vote>,
    pub summary: VoteSummary,
}
