//! Database operations for votes
//!
//! Every transition (create / toggle-off / switch) touches the vote row
//! and the contribution's counters in one transaction. The unique index
//! on (contribution_id, user_id) serializes concurrent votes by the same
//! user on the same contribution.

use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::shared::contribution::VoteCounts;
use crate::shared::vote::{Vote, VoteTransition, VoteType};

fn vote_from_row(row: &sqlx::postgres::PgRow) -> Vote {
    Vote {
        id: row.get("id"),
        contribution_id: row.get("contribution_id"),
        story_id: row.get("story_id"),
        user_id: row.get("user_id"),
        vote_type: VoteType::from_str(row.get::<String, _>("vote_type").as_str())
            .unwrap_or(VoteType::Upvote),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Find a user's vote on a contribution
pub async fn find_vote(
    pool: &PgPool,
    contribution_id: Uuid,
    user_id: Uuid,
) -> Result<Option<Vote>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, contribution_id, story_id, user_id, vote_type, created_at, updated_at
        FROM votes
        WHERE contribution_id = $1 AND user_id = $2
        "#,
    )
    .bind(contribution_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(vote_from_row))
}

/// List all votes for a contribution
pub async fn list_for_contribution(
    pool: &PgPool,
    contribution_id: Uuid,
) -> Result<Vec<Vote>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, contribution_id, story_id, user_id, vote_type, created_at, updated_at
        FROM votes
        WHERE contribution_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(contribution_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(vote_from_row).collect())
}

/// Outcome of casting a vote
#[derive(Debug, Clone)]
pub struct VoteOutcome {
    pub transition: VoteTransition,
    /// The vote after the transition; `None` when it was removed
    pub vote: Option<Vote>,
    /// The contribution's counters after the transition
    pub counts: VoteCounts,
}

/// Cast a vote, resolving the three-way transition against the caller's
/// existing vote.
///
/// The vote row write and the counter update commit together; a failure
/// of either leaves both untouched.
pub async fn cast_vote(
    pool: &PgPool,
    contribution_id: Uuid,
    story_id: Uuid,
    user_id: Uuid,
    requested: VoteType,
) -> Result<VoteOutcome, sqlx::Error> {
    let existing = find_vote(pool, contribution_id, user_id).await?;
    let transition = VoteTransition::resolve(existing.as_ref().map(|v| v.vote_type), requested);

    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let vote = match existing {
        None => {
            let id = Uuid::new_v4();
            sqlx::query(
                r#"
                INSERT INTO votes (id, contribution_id, story_id, user_id, vote_type, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $6)
                "#,
            )
            .bind(id)
            .bind(contribution_id)
            .bind(story_id)
            .bind(user_id)
            .bind(requested.as_str())
            .bind(now)
            .execute(&mut *tx)
            .await?;

            Some(Vote {
                id,
                contribution_id,
                story_id,
                user_id,
                vote_type: requested,
                created_at: now,
                updated_at: now,
            })
        }
        Some(vote) if vote.vote_type == requested => {
            // Same direction again: toggle the vote off
            sqlx::query("DELETE FROM votes WHERE id = $1")
                .bind(vote.id)
                .execute(&mut *tx)
                .await?;
            None
        }
        Some(vote) => {
            sqlx::query("UPDATE votes SET vote_type = $2, updated_at = $3 WHERE id = $1")
                .bind(vote.id)
                .bind(requested.as_str())
                .bind(now)
                .execute(&mut *tx)
                .await?;

            Some(Vote {
                vote_type: requested,
                updated_at: now,
                ..vote
            })
        }
    };

    let (du, dd) = transition.deltas();
    let row = sqlx::query(
        r#"
        UPDATE contributions
        SET upvotes = upvotes + $2, downvotes = downvotes + $3
        WHERE id = $1
        RETURNING upvotes, downvotes
        "#,
    )
    .bind(contribution_id)
    .bind(du)
    .bind(dd)
    .fetch_one(&mut *tx)
    .await?;

    let counts = VoteCounts {
        upvotes: row.get("upvotes"),
        downvotes: row.get("downvotes"),
    };

    tx.commit().await?;

    Ok(VoteOutcome {
        transition,
        vote,
        counts,
    })
}
