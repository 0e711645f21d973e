//! Database operations for notifications

use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::shared::notification::{Notification, NotificationKind};

/// Notifications returned per listing
const LIST_LIMIT: i64 = 20;

fn notification_from_row(row: &sqlx::postgres::PgRow) -> Notification {
    Notification {
        id: row.get("id"),
        recipient_id: row.get("recipient_id"),
        sender_id: row.get("sender_id"),
        kind: NotificationKind::from_str(row.get::<String, _>("kind").as_str())
            .unwrap_or(NotificationKind::Contribution),
        story_id: row.get("story_id"),
        contribution_id: row.get("contribution_id"),
        message: row.get("message"),
        read: row.get("read"),
        created_at: row.get("created_at"),
    }
}

/// Create a notification
pub async fn create_notification(
    pool: &PgPool,
    recipient_id: Uuid,
    sender_id: Uuid,
    kind: NotificationKind,
    story_id: Option<Uuid>,
    contribution_id: Option<Uuid>,
    message: &str,
) -> Result<Notification, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO notifications (id, recipient_id, sender_id, kind, story_id, contribution_id, message, read, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, $8)
        "#,
    )
    .bind(id)
    .bind(recipient_id)
    .bind(sender_id)
    .bind(kind.as_str())
    .bind(story_id)
    .bind(contribution_id)
    .bind(message)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Notification {
        id,
        recipient_id,
        sender_id,
        kind,
        story_id,
        contribution_id,
        message: message.to_string(),
        read: false,
        created_at: now,
    })
}

/// Fire-and-forget notification write.
///
/// Called by handlers after their own state change has committed; a
/// failure here is logged and never propagated.
pub async fn notify_quietly(
    pool: &PgPool,
    recipient_id: Uuid,
    sender_id: Uuid,
    kind: NotificationKind,
    story_id: Option<Uuid>,
    contribution_id: Option<Uuid>,
    message: &str,
) {
    if let Err(e) = create_notification(
        pool,
        recipient_id,
        sender_id,
        kind,
        story_id,
        contribution_id,
        message,
    )
    .await
    {
        tracing::warn!("Failed to write notification for {}: {:?}", recipient_id, e);
    }
}

/// Latest notifications for a recipient
pub async fn list_for_recipient(
    pool: &PgPool,
    recipient_id: Uuid,
) -> Result<Vec<Notification>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, recipient_id, sender_id, kind, story_id, contribution_id, message, read, created_at
        FROM notifications
        WHERE recipient_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(recipient_id)
    .bind(LIST_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(notification_from_row).collect())
}

/// Count unread notifications for a recipient
pub async fn count_unread(pool: &PgPool, recipient_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        "SELECT COUNT(*) AS count FROM notifications WHERE recipient_id = $1 AND NOT read",
    )
    .bind(recipient_id)
    .fetch_one(pool)
    .await?;
    Ok(row.get("count"))
}

/// Mark one notification read; scoped to the recipient
pub async fn mark_read(
    pool: &PgPool,
    notification_id: Uuid,
    recipient_id: Uuid,
) -> Result<Option<Notification>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        UPDATE notifications SET read = TRUE
        WHERE id = $1 AND recipient_id = $2
        RETURNING id, recipient_id, sender_id, kind, story_id, contribution_id, message, read, created_at
        "#,
    )
    .bind(notification_id)
    .bind(recipient_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(notification_from_row))
}

/// Mark all of a recipient's notifications read
pub async fn mark_all_read(pool: &PgPool, recipient_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE notifications SET read = TRUE WHERE recipient_id = $1 AND NOT read")
        .bind(recipient_id)
        .execute(pool)
        .await?;
    Ok(())
}
