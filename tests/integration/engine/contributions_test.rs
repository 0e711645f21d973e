//! Contribution engine tests (database-backed)
//!
//! These exercise position sequencing, the contributor set, and the
//! selection invariant against a real PostgreSQL schema. Run with
//! `cargo test -- --ignored`.

use serial_test::serial;
use sqlx::PgPool;
use uuid::Uuid;

use storyloom::backend::contributions::db as contributions;
use storyloom::backend::stories::db as stories;
use storyloom::shared::contribution::ContributionStatus;
use storyloom::shared::story::{CreateStoryRequest, Genre};

use crate::common::auth_helpers::create_unique_test_user;
use crate::common::database::TestDatabase;

async fn seed_story(pool: &PgPool, creator_id: Uuid) -> storyloom::shared::story::Story {
    let request = CreateStoryRequest {
        title: "The Lighthouse at World's End".to_string(),
        description: "Every keeper before her vanished on the ninth night.".to_string(),
        genre: Genre::Mystery,
        tags: vec!["lighthouse".to_string()],
        is_private: false,
        max_contributors: 0,
        contribution_time_limit: 0,
        cover_image: String::new(),
    };
    stories::create_story(pool, creator_id, &request).await.unwrap()
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn test_positions_are_assigned_sequentially() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let creator = create_unique_test_user(pool).await.unwrap();
    let other = create_unique_test_user(pool).await.unwrap();
    let story = seed_story(pool, creator.id).await;

    let first = contributions::create_contribution(
        pool,
        story.id,
        creator.id,
        "This is a ten+ char opening.",
        None,
    )
    .await
    .unwrap();
    assert_eq!(first.position, 1);
    assert_eq!(first.status, ContributionStatus::Pending);
    assert!(!first.is_selected);

    let second = contributions::create_contribution(
        pool,
        story.id,
        other.id,
        "A second continuation follows.",
        None,
    )
    .await
    .unwrap();
    assert_eq!(second.position, 2);
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn test_positions_are_never_reused_after_deletion() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let creator = create_unique_test_user(pool).await.unwrap();
    let story = seed_story(pool, creator.id).await;

    for text in [
        "The keeper lit the ninth lamp.",
        "The sea went perfectly still.",
        "Something knocked from below.",
    ] {
        contributions::create_contribution(pool, story.id, creator.id, text, None)
            .await
            .unwrap();
    }

    let all = contributions::list_for_story(
        pool,
        story.id,
        storyloom::shared::contribution::ContributionSort::Position,
        storyloom::shared::contribution::SortOrder::Asc,
    )
    .await
    .unwrap();
    assert_eq!(all.len(), 3);

    // Delete the tail and submit again: the gap is not refilled
    contributions::delete_contribution(pool, all[2].id).await.unwrap();
    contributions::delete_contribution(pool, all[1].id).await.unwrap();

    let next = contributions::create_contribution(
        pool,
        story.id,
        creator.id,
        "The lamp answered the knock.",
        None,
    )
    .await
    .unwrap();
    // Max remaining position is 1, so the next append lands at 2; it never
    // dips below a previously assigned live position
    assert_eq!(next.position, 2);
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn test_contributor_set_appends_once_per_user() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let creator = create_unique_test_user(pool).await.unwrap();
    let other = create_unique_test_user(pool).await.unwrap();
    let story = seed_story(pool, creator.id).await;

    contributions::create_contribution(pool, story.id, other.id, "First from this writer.", None)
        .await
        .unwrap();
    contributions::create_contribution(pool, story.id, other.id, "Second from this writer.", None)
        .await
        .unwrap();

    let contributors = stories::get_contributors(pool, story.id).await.unwrap();
    // creator (at story creation) + the one new writer
    assert_eq!(contributors.len(), 2);
    assert!(contributors.contains(&other.id));
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn test_selection_clears_siblings_at_same_position() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let creator = create_unique_test_user(pool).await.unwrap();
    let story = seed_story(pool, creator.id).await;

    let c1 = contributions::create_contribution(pool, story.id, creator.id, "Branch one of the tale.", None)
        .await
        .unwrap();
    let c2 = contributions::create_contribution(pool, story.id, creator.id, "Branch two of the tale.", None)
        .await
        .unwrap();

    // Make the two contributions siblings at the same position, as
    // branching submissions produce
    sqlx::query("UPDATE contributions SET position = $1 WHERE id = $2")
        .bind(c1.position)
        .bind(c2.id)
        .execute(pool)
        .await
        .unwrap();

    let selected = contributions::select_contribution(pool, &c1).await.unwrap();
    assert!(selected.is_selected);
    assert_eq!(selected.status, ContributionStatus::Approved);

    // Selecting the sibling flips the flag over
    let c2 = contributions::get_contribution(pool, c2.id).await.unwrap().unwrap();
    let selected2 = contributions::select_contribution(pool, &c2).await.unwrap();
    assert!(selected2.is_selected);

    let c1_after = contributions::get_contribution(pool, c1.id).await.unwrap().unwrap();
    assert!(!c1_after.is_selected);
    // Selection never rewrites a sibling's status, only its flag
    assert_eq!(c1_after.status, ContributionStatus::Approved);
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn test_selection_is_idempotent() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let creator = create_unique_test_user(pool).await.unwrap();
    let story = seed_story(pool, creator.id).await;

    let c = contributions::create_contribution(pool, story.id, creator.id, "The only continuation.", None)
        .await
        .unwrap();

    let first = contributions::select_contribution(pool, &c).await.unwrap();
    let second = contributions::select_contribution(pool, &first).await.unwrap();

    assert!(second.is_selected);
    assert_eq!(second.status, ContributionStatus::Approved);
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn test_comments_append_in_order() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let creator = create_unique_test_user(pool).await.unwrap();
    let story = seed_story(pool, creator.id).await;

    let c = contributions::create_contribution(pool, story.id, creator.id, "A comment magnet, surely.", None)
        .await
        .unwrap();

    contributions::add_comment(pool, c.id, creator.id, "love the pacing").await.unwrap();
    contributions::add_comment(pool, c.id, creator.id, "the knock detail is great").await.unwrap();

    let comments = contributions::list_comments(pool, c.id).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].text, "love the pacing");
    assert_eq!(comments[1].text, "the knock detail is great");
}
