//! Database operations for collaborator invites

use chrono::{Duration, Utc};
use rand::RngCore;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::shared::invite::{CollaboratorRole, Invite};

/// Invite validity window
const INVITE_TTL_DAYS: i64 = 7;

/// Generate a random 20-byte hex invite token
fn generate_token() -> String {
    let mut bytes = [0u8; 20];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn invite_from_row(row: &sqlx::postgres::PgRow) -> Invite {
    Invite {
        id: row.get("id"),
        email: row.get("email"),
        story_id: row.get("story_id"),
        invited_by: row.get("invited_by"),
        role: CollaboratorRole::from_str(row.get::<String, _>("role").as_str())
            .unwrap_or_default(),
        token: row.get("token"),
        expires_at: row.get("expires_at"),
        created_at: row.get("created_at"),
    }
}

/// Create an invite for an email address
pub async fn create_invite(
    pool: &PgPool,
    story_id: Uuid,
    invited_by: Uuid,
    email: &str,
    role: CollaboratorRole,
) -> Result<Invite, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    let token = generate_token();
    let expires_at = now + Duration::days(INVITE_TTL_DAYS);

    sqlx::query(
        r#"
        INSERT INTO invites (id, email, story_id, invited_by, role, token, expires_at, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(story_id)
    .bind(invited_by)
    .bind(role.as_str())
    .bind(&token)
    .bind(expires_at)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Invite {
        id,
        email: email.to_string(),
        story_id,
        invited_by,
        role,
        token,
        expires_at,
        created_at: now,
    })
}

/// Find a pending invite for an (email, story) pair
pub async fn find_invite(
    pool: &PgPool,
    email: &str,
    story_id: Uuid,
) -> Result<Option<Invite>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, email, story_id, invited_by, role, token, expires_at, created_at
        FROM invites
        WHERE email = $1 AND story_id = $2
        "#,
    )
    .bind(email)
    .bind(story_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(invite_from_row))
}

/// Find an unexpired invite by token
pub async fn find_valid_invite_by_token(
    pool: &PgPool,
    token: &str,
) -> Result<Option<Invite>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, email, story_id, invited_by, role, token, expires_at, created_at
        FROM invites
        WHERE token = $1 AND expires_at > $2
        "#,
    )
    .bind(token)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(invite_from_row))
}

/// Delete an invite once consumed
pub async fn delete_invite(pool: &PgPool, invite_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM invites WHERE id = $1")
        .bind(invite_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Add a user to a story's collaborator set with a role; idempotent
pub async fn add_collaborator(
    pool: &PgPool,
    story_id: Uuid,
    user_id: Uuid,
    role: CollaboratorRole,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO story_collaborators (story_id, user_id, role)
        VALUES ($1, $2, $3)
        ON CONFLICT (story_id, user_id) DO NOTHING
        "#,
    )
    .bind(story_id)
    .bind(user_id)
    .bind(role.as_str())
    .execute(pool)
    .await?;
    Ok(())
}

/// Whether a user is already a collaborator on a story
pub async fn is_collaborator(
    pool: &PgPool,
    story_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        "SELECT COUNT(*) AS count FROM story_collaborators WHERE story_id = $1 AND user_id = $2",
    )
    .bind(story_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    let count: i64 = row.get("count");
    Ok(count > 0)
}
