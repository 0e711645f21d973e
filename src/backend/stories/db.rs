//! Database operations for stories
//!
//! This module contains the story table operations, including the
//! contributor set that backs the capacity gate.

use chrono::Utc;
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use crate::shared::story::{CreateStoryRequest, Genre, Story, StoryStatus, UpdateStoryRequest};

/// Sort columns admitted for story listings; anything else falls back to
/// creation time.
fn sort_column(sort: &str) -> &'static str {
    match sort {
        "title" => "title",
        "views" => "views",
        "likes" => "likes",
        "updatedAt" | "updated_at" => "updated_at",
        _ => "created_at",
    }
}

fn story_from_row(row: &sqlx::postgres::PgRow) -> Story {
    Story {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        genre: Genre::from_str(row.get::<String, _>("genre").as_str()).unwrap_or(Genre::Other),
        tags: row.get("tags"),
        creator_id: row.get("creator_id"),
        status: StoryStatus::from_str(row.get::<String, _>("status").as_str())
            .unwrap_or(StoryStatus::Active),
        is_private: row.get("is_private"),
        max_contributors: row.get("max_contributors"),
        contribution_time_limit: row.get("contribution_time_limit"),
        cover_image: row.get("cover_image"),
        views: row.get("views"),
        likes: row.get("likes"),
        contributors: Vec::new(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

const STORY_COLUMNS: &str = "id, title, description, genre, tags, creator_id, status, is_private, \
     max_contributors, contribution_time_limit, cover_image, views, likes, created_at, updated_at";

/// Create a new story; the creator becomes the first contributor
pub async fn create_story(
    pool: &PgPool,
    creator_id: Uuid,
    request: &CreateStoryRequest,
) -> Result<Story, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO stories (id, title, description, genre, tags, creator_id, status, is_private,
                             max_contributors, contribution_time_limit, cover_image, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, 'active', $7, $8, $9, $10, $11, $11)
        "#,
    )
    .bind(id)
    .bind(request.title.trim())
    .bind(request.description.trim())
    .bind(request.genre.as_str())
    .bind(&request.tags)
    .bind(creator_id)
    .bind(request.is_private)
    .bind(request.max_contributors)
    .bind(request.contribution_time_limit)
    .bind(&request.cover_image)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    add_contributor(&mut tx, id, creator_id).await?;

    tx.commit().await?;

    Ok(Story {
        id,
        title: request.title.trim().to_string(),
        description: request.description.trim().to_string(),
        genre: request.genre,
        tags: request.tags.clone(),
        creator_id,
        status: StoryStatus::Active,
        is_private: request.is_private,
        max_contributors: request.max_contributors,
        contribution_time_limit: request.contribution_time_limit,
        cover_image: request.cover_image.clone(),
        views: 0,
        likes: 0,
        contributors: vec![creator_id],
        created_at: now,
        updated_at: now,
    })
}

/// Get a story by ID with its contributor set
pub async fn get_story(pool: &PgPool, story_id: Uuid) -> Result<Option<Story>, sqlx::Error> {
    let row = sqlx::query(&format!("SELECT {} FROM stories WHERE id = $1", STORY_COLUMNS))
        .bind(story_id)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let mut story = story_from_row(&row);
    story.contributors = get_contributors(pool, story_id).await?;
    Ok(Some(story))
}

/// Get the distinct contributor set for a story
pub async fn get_contributors(pool: &PgPool, story_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT user_id FROM story_contributors WHERE story_id = $1 ORDER BY joined_at",
    )
    .bind(story_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(|r| r.get("user_id")).collect())
}

/// Add a user to a story's contributor set; idempotent
pub async fn add_contributor(
    tx: &mut Transaction<'_, Postgres>,
    story_id: Uuid,
    user_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO story_contributors (story_id, user_id)
        VALUES ($1, $2)
        ON CONFLICT (story_id, user_id) DO NOTHING
        "#,
    )
    .bind(story_id)
    .bind(user_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// List stories with pagination and optional genre/status filters.
///
/// Private stories are excluded unless `include_private` is set (admin
/// callers). Returns the page of stories and the total match count.
pub async fn list_stories(
    pool: &PgPool,
    genre: Option<&str>,
    status: Option<&str>,
    include_private: bool,
    page: i64,
    limit: i64,
    sort: &str,
    descending: bool,
) -> Result<(Vec<Story>, i64), sqlx::Error> {
    let page = page.max(1);
    let limit = limit.clamp(1, 100);
    let offset = (page - 1) * limit;
    let order = if descending { "DESC" } else { "ASC" };

    let query = format!(
        r#"
        SELECT {columns} FROM stories
        WHERE ($1::text IS NULL OR genre = $1)
          AND ($2::text IS NULL OR status = $2)
          AND ($3 OR NOT is_private)
        ORDER BY {column} {order}
        LIMIT $4 OFFSET $5
        "#,
        columns = STORY_COLUMNS,
        column = sort_column(sort),
        order = order,
    );

    let rows = sqlx::query(&query)
        .bind(genre)
        .bind(status)
        .bind(include_private)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    let mut stories: Vec<Story> = rows.iter().map(story_from_row).collect();
    for story in &mut stories {
        story.contributors = get_contributors(pool, story.id).await?;
    }

    let total: i64 = sqlx::query(
        r#"
        SELECT COUNT(*) AS count FROM stories
        WHERE ($1::text IS NULL OR genre = $1)
          AND ($2::text IS NULL OR status = $2)
          AND ($3 OR NOT is_private)
        "#,
    )
    .bind(genre)
    .bind(status)
    .bind(include_private)
    .fetch_one(pool)
    .await?
    .get("count");

    Ok((stories, total))
}

/// Increment a story's view counter
pub async fn increment_views(pool: &PgPool, story_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE stories SET views = views + 1 WHERE id = $1")
        .bind(story_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Increment a story's like counter and return the new value
pub async fn like_story(pool: &PgPool, story_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("UPDATE stories SET likes = likes + 1 WHERE id = $1 RETURNING likes")
        .bind(story_id)
        .fetch_one(pool)
        .await?;
    Ok(row.get("likes"))
}

/// Apply a partial update to a story; absent fields are left unchanged
pub async fn update_story(
    pool: &PgPool,
    story_id: Uuid,
    request: &UpdateStoryRequest,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE stories SET
            title = COALESCE($2, title),
            description = COALESCE($3, description),
            genre = COALESCE($4, genre),
            tags = COALESCE($5, tags),
            is_private = COALESCE($6, is_private),
            max_contributors = COALESCE($7, max_contributors),
            contribution_time_limit = COALESCE($8, contribution_time_limit),
            status = COALESCE($9, status),
            cover_image = COALESCE($10, cover_image),
            updated_at = $11
        WHERE id = $1
        "#,
    )
    .bind(story_id)
    .bind(request.title.as_deref().map(str::trim))
    .bind(request.description.as_deref().map(str::trim))
    .bind(request.genre.map(|g| g.as_str()))
    .bind(request.tags.as_deref())
    .bind(request.is_private)
    .bind(request.max_contributors)
    .bind(request.contribution_time_limit)
    .bind(request.status.map(|s| s.as_str()))
    .bind(request.cover_image.as_deref())
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(())
}

/// Delete a story.
///
/// Contributions, votes, comments, invites and the contributor set are
/// removed with it through the schema's cascades.
pub async fn delete_story(pool: &PgPool, story_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM stories WHERE id = $1")
        .bind(story_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Count public stories
pub async fn count_public_stories(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM stories WHERE NOT is_private")
        .fetch_one(pool)
        .await?;
    Ok(row.get("count"))
}
