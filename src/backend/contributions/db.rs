//! Database operations for contributions
//!
//! Multi-row transitions (insert + contributor append, selection
//! clear + set) run inside single transactions so no half-applied state
//! is ever observable.

use chrono::Utc;
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use crate::backend::stories::db::add_contributor;
use crate::shared::contribution::{
    Comment, Contribution, ContributionSort, ContributionStatus, SortOrder, VoteCounts,
};

const CONTRIBUTION_COLUMNS: &str = "id, story_id, user_id, content, status, position, parent_id, \
     is_selected, upvotes, downvotes, created_at, updated_at";

fn contribution_from_row(row: &sqlx::postgres::PgRow) -> Contribution {
    Contribution {
        id: row.get("id"),
        story_id: row.get("story_id"),
        user_id: row.get("user_id"),
        content: row.get("content"),
        status: ContributionStatus::from_str(row.get::<String, _>("status").as_str())
            .unwrap_or(ContributionStatus::Pending),
        position: row.get("position"),
        parent_id: row.get("parent_id"),
        is_selected: row.get("is_selected"),
        votes: VoteCounts {
            upvotes: row.get("upvotes"),
            downvotes: row.get("downvotes"),
        },
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Next position in a story's append sequence: max + 1, or 1 when the
/// story has no contributions yet.
async fn next_position(
    tx: &mut Transaction<'_, Postgres>,
    story_id: Uuid,
) -> Result<i32, sqlx::Error> {
    let row = sqlx::query(
        "SELECT COALESCE(MAX(position), 0) + 1 AS next FROM contributions WHERE story_id = $1",
    )
    .bind(story_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(row.get("next"))
}

/// Create a contribution and append the author to the story's contributor
/// set in one transaction.
pub async fn create_contribution(
    pool: &PgPool,
    story_id: Uuid,
    user_id: Uuid,
    content: &str,
    parent_id: Option<Uuid>,
) -> Result<Contribution, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    let position = next_position(&mut tx, story_id).await?;

    sqlx::query(
        r#"
        INSERT INTO contributions (id, story_id, user_id, content, status, position, parent_id,
                                   is_selected, upvotes, downvotes, created_at, updated_at)
        VALUES ($1, $2, $3, $4, 'pending', $5, $6, FALSE, 0, 0, $7, $7)
        "#,
    )
    .bind(id)
    .bind(story_id)
    .bind(user_id)
    .bind(content)
    .bind(position)
    .bind(parent_id)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    add_contributor(&mut tx, story_id, user_id).await?;

    tx.commit().await?;

    Ok(Contribution {
        id,
        story_id,
        user_id,
        content: content.to_string(),
        status: ContributionStatus::Pending,
        position,
        parent_id,
        is_selected: false,
        votes: VoteCounts::default(),
        created_at: now,
        updated_at: now,
    })
}

/// Get a contribution by ID
pub async fn get_contribution(
    pool: &PgPool,
    contribution_id: Uuid,
) -> Result<Option<Contribution>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM contributions WHERE id = $1",
        CONTRIBUTION_COLUMNS
    ))
    .bind(contribution_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(contribution_from_row))
}

/// List a story's contributions in the requested order
pub async fn list_for_story(
    pool: &PgPool,
    story_id: Uuid,
    sort: ContributionSort,
    order: SortOrder,
) -> Result<Vec<Contribution>, sqlx::Error> {
    let query = format!(
        "SELECT {columns} FROM contributions WHERE story_id = $1 ORDER BY {column} {order}, created_at ASC",
        columns = CONTRIBUTION_COLUMNS,
        column = sort.column(),
        order = order.keyword(),
    );

    let rows = sqlx::query(&query).bind(story_id).fetch_all(pool).await?;

    Ok(rows.iter().map(contribution_from_row).collect())
}

/// Apply a partial update to a contribution; absent fields are unchanged
pub async fn update_contribution(
    pool: &PgPool,
    contribution_id: Uuid,
    content: Option<&str>,
    status: Option<ContributionStatus>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE contributions SET
            content = COALESCE($2, content),
            status = COALESCE($3, status),
            updated_at = $4
        WHERE id = $1
        "#,
    )
    .bind(contribution_id)
    .bind(content)
    .bind(status.map(|s| s.as_str()))
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(())
}

/// Delete a contribution.
///
/// Votes and comments cascade with it; sibling positions are never
/// renumbered.
pub async fn delete_contribution(pool: &PgPool, contribution_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM contributions WHERE id = $1")
        .bind(contribution_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Append a comment to a contribution
pub async fn add_comment(
    pool: &PgPool,
    contribution_id: Uuid,
    user_id: Uuid,
    text: &str,
) -> Result<Comment, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO contribution_comments (id, contribution_id, user_id, text, created_at)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(contribution_id)
    .bind(user_id)
    .bind(text)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Comment {
        id,
        contribution_id,
        user_id,
        text: text.to_string(),
        created_at: now,
    })
}

/// List a contribution's comments in creation order
pub async fn list_comments(
    pool: &PgPool,
    contribution_id: Uuid,
) -> Result<Vec<Comment>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, contribution_id, user_id, text, created_at
        FROM contribution_comments
        WHERE contribution_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(contribution_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| Comment {
            id: row.get("id"),
            contribution_id: row.get("contribution_id"),
            user_id: row.get("user_id"),
            text: row.get("text"),
            created_at: row.get("created_at"),
        })
        .collect())
}

/// Select a contribution as the canonical continuation at its position.
///
/// Clears `is_selected` on every sibling sharing the (story, position)
/// pair, then marks the target selected and approved. Both steps commit
/// together; concurrent selections serialize on the row locks, so the
/// last committed call wins and the at-most-one invariant holds.
/// Idempotent for repeated calls on the same contribution.
pub async fn select_contribution(
    pool: &PgPool,
    contribution: &Contribution,
) -> Result<Contribution, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        UPDATE contributions SET is_selected = FALSE
        WHERE story_id = $1 AND position = $2 AND id <> $3
        "#,
    )
    .bind(contribution.story_id)
    .bind(contribution.position)
    .bind(contribution.id)
    .execute(&mut *tx)
    .await?;

    let row = sqlx::query(&format!(
        r#"
        UPDATE contributions SET is_selected = TRUE, status = 'approved', updated_at = $2
        WHERE id = $1
        RETURNING {}
        "#,
        CONTRIBUTION_COLUMNS
    ))
    .bind(contribution.id)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(contribution_from_row(&row))
}
