//! Story Data Structures
//!
//! A story is the aggregate contributions attach to. It carries the status
//! gate (only `active` stories accept contributions) and the contributor
//! capacity rule enforced at contribution-creation time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Lifecycle status of a story
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoryStatus {
    Active,
    Completed,
    Archived,
}

impl StoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryStatus::Active => "active",
            StoryStatus::Completed => "completed",
            StoryStatus::Archived => "archived",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(StoryStatus::Active),
            "completed" => Some(StoryStatus::Completed),
            "archived" => Some(StoryStatus::Archived),
            _ => None,
        }
    }

    /// Whether the story accepts new contributions
    pub fn is_active(&self) -> bool {
        matches!(self, StoryStatus::Active)
    }
}

/// Story genre
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Genre {
    Fantasy,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Mystery,
    Horror,
    Romance,
    Adventure,
    Thriller,
    #[serde(rename = "Historical Fiction")]
    HistoricalFiction,
    Comedy,
    Drama,
    Other,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fantasy => "Fantasy",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Mystery => "Mystery",
            Genre::Horror => "Horror",
            Genre::Romance => "Romance",
            Genre::Adventure => "Adventure",
            Genre::Thriller => "Thriller",
            Genre::HistoricalFiction => "Historical Fiction",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Fantasy" => Some(Genre::Fantasy),
            "Science Fiction" => Some(Genre::ScienceFiction),
            "Mystery" => Some(Genre::Mystery),
            "Horror" => Some(Genre::Horror),
            "Romance" => Some(Genre::Romance),
            "Adventure" => Some(Genre::Adventure),
            "Thriller" => Some(Genre::Thriller),
            "Historical Fiction" => Some(Genre::HistoricalFiction),
            "Comedy" => Some(Genre::Comedy),
            "Drama" => Some(Genre::Drama),
            "Other" => Some(Genre::Other),
            _ => None,
        }
    }
}

/// Outcome of the contribution admission gate for a story
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributionGate {
    /// The submission may proceed
    Open,
    /// The story is completed or archived
    StoryNotActive,
    /// The contributor limit is reached and the submitter is not already
    /// among the contributors
    ContributorLimitReached,
}

/// Represents a collaborative story
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    /// Unique story ID
    pub id: Uuid,
    /// Story title
    pub title: String,
    /// Story description / premise
    pub description: String,
    /// Story genre
    pub genre: Genre,
    /// Free-form tags
    pub tags: Vec<String>,
    /// The user who created the story
    pub creator_id: Uuid,
    /// Lifecycle status
    pub status: StoryStatus,
    /// Whether the story is visible only to the creator and admins
    pub is_private: bool,
    /// Maximum number of distinct contributors (0 = unlimited)
    pub max_contributors: i32,
    /// Time limit per contribution in hours (0 = none; informational)
    pub contribution_time_limit: i32,
    /// Cover image URL
    pub cover_image: String,
    /// View counter
    pub views: i64,
    /// Like counter
    pub likes: i64,
    /// Distinct set of users who have contributed
    pub contributors: Vec<Uuid>,
    /// When the story was created
    pub created_at: DateTime<Utc>,
    /// When the story was last updated
    pub updated_at: DateTime<Utc>,
}

impl Story {
    /// Decide whether `user_id` may submit a contribution right now.
    ///
    /// The status gate applies first; the capacity gate only blocks
    /// first-time contributors once the distinct contributor set has
    /// reached `max_contributors` (0 means unlimited).
    pub fn contribution_gate(&self, user_id: Uuid) -> ContributionGate {
        if !self.status.is_active() {
            return ContributionGate::StoryNotActive;
        }
        let already_contributor = self.contributors.contains(&user_id);
        if self.max_contributors > 0
            && self.contributors.len() >= self.max_contributors as usize
            && !already_contributor
        {
            return ContributionGate::ContributorLimitReached;
        }
        ContributionGate::Open
    }

    /// Whether `user_id` may administer this story (select contributions,
    /// update, delete)
    pub fn is_managed_by(&self, user_id: Uuid, is_admin: bool) -> bool {
        self.creator_id == user_id || is_admin
    }
}

/// Validate a story title (3-100 characters, trimmed)
pub fn validate_title(title: &str) -> Result<(), SharedError> {
    let len = title.trim().chars().count();
    if !(3..=100).contains(&len) {
        return Err(SharedError::validation(
            "title",
            "Title must be between 3 and 100 characters",
        ));
    }
    Ok(())
}

/// Validate a story description (non-empty, at most 500 characters)
pub fn validate_description(description: &str) -> Result<(), SharedError> {
    let len = description.trim().chars().count();
    if len == 0 {
        return Err(SharedError::validation("description", "Description is required"));
    }
    if len > 500 {
        return Err(SharedError::validation(
            "description",
            "Description cannot exceed 500 characters",
        ));
    }
    Ok(())
}

/// Request body for creating a story
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStoryRequest {
    pub title: String,
    pub description: String,
    pub genre: Genre,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub max_contributors: i32,
    #[serde(default)]
    pub contribution_time_limit: i32,
    #[serde(default)]
    pub cover_image: String,
}

/// Request body for updating a story; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStoryRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub genre: Option<Genre>,
    pub tags: Option<Vec<String>>,
    pub is_private: Option<bool>,
    pub max_contributors: Option<i32>,
    pub contribution_time_limit: Option<i32>,
    pub status: Option<StoryStatus>,
    pub cover_image: Option<String>,
}

/// Pagination metadata returned by story listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub pages: i64,
}

/// Response type for listing stories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListStoriesResponse {
    pub success: bool,
    pub stories: Vec<Story>,
    pub pagination: Pagination,
}

/// Response type for a single story
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryResponse {
    pub success: bool,
    pub story: Story,
}

/// Platform statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformStats {
    pub stories: i64,
    pub writers: i64,
}
