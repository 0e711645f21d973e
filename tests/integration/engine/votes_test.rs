//! Voting engine tests (database-backed)
//!
//! These exercise the three-way transition against the real schema and
//! check the counters stay consistent with the vote set. Run with
//! `cargo test -- --ignored`.

use serial_test::serial;
use sqlx::PgPool;
use uuid::Uuid;

use storyloom::backend::contributions::db as contributions;
use storyloom::backend::stories::db as stories;
use storyloom::backend::votes::db as votes;
use storyloom::shared::contribution::Contribution;
use storyloom::shared::story::{CreateStoryRequest, Genre};
use storyloom::shared::vote::VoteType;

use crate::common::auth_helpers::create_unique_test_user;
use crate::common::database::TestDatabase;

async fn seed_contribution(pool: &PgPool, author_id: Uuid) -> Contribution {
    let request = CreateStoryRequest {
        title: "Voting Grounds".to_string(),
        description: "A story for exercising the ballot box.".to_string(),
        genre: Genre::Drama,
        tags: vec![],
        is_private: false,
        max_contributors: 0,
        contribution_time_limit: 0,
        cover_image: String::new(),
    };
    let story = stories::create_story(pool, author_id, &request).await.unwrap();
    contributions::create_contribution(pool, story.id, author_id, "A contribution worth voting on.", None)
        .await
        .unwrap()
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn test_first_vote_creates_and_counts() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let author = create_unique_test_user(pool).await.unwrap();
    let voter = create_unique_test_user(pool).await.unwrap();
    let c = seed_contribution(pool, author.id).await;

    let outcome = votes::cast_vote(pool, c.id, c.story_id, voter.id, VoteType::Upvote)
        .await
        .unwrap();

    assert_eq!(outcome.counts.upvotes, 1);
    assert_eq!(outcome.counts.downvotes, 0);
    assert!(outcome.vote.is_some());

    let stored = votes::find_vote(pool, c.id, voter.id).await.unwrap().unwrap();
    assert_eq!(stored.vote_type, VoteType::Upvote);
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn test_toggle_then_switch_scenario() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let author = create_unique_test_user(pool).await.unwrap();
    let voter = create_unique_test_user(pool).await.unwrap();
    let c = seed_contribution(pool, author.id).await;

    // Upvote: 0 -> 1
    let o1 = votes::cast_vote(pool, c.id, c.story_id, voter.id, VoteType::Upvote).await.unwrap();
    assert_eq!((o1.counts.upvotes, o1.counts.downvotes), (1, 0));

    // Upvote again: toggle off, 1 -> 0, vote deleted
    let o2 = votes::cast_vote(pool, c.id, c.story_id, voter.id, VoteType::Upvote).await.unwrap();
    assert_eq!((o2.counts.upvotes, o2.counts.downvotes), (0, 0));
    assert!(o2.vote.is_none());
    assert!(votes::find_vote(pool, c.id, voter.id).await.unwrap().is_none());

    // Downvote: fresh vote in the other direction
    let o3 = votes::cast_vote(pool, c.id, c.story_id, voter.id, VoteType::Downvote).await.unwrap();
    assert_eq!((o3.counts.upvotes, o3.counts.downvotes), (0, 1));

    // Upvote now switches the existing vote
    let o4 = votes::cast_vote(pool, c.id, c.story_id, voter.id, VoteType::Upvote).await.unwrap();
    assert_eq!((o4.counts.upvotes, o4.counts.downvotes), (1, 0));
    let stored = votes::find_vote(pool, c.id, voter.id).await.unwrap().unwrap();
    assert_eq!(stored.vote_type, VoteType::Upvote);
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn test_counters_match_vote_set_across_users() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let author = create_unique_test_user(pool).await.unwrap();
    let c = seed_contribution(pool, author.id).await;

    for _ in 0..3 {
        let voter = create_unique_test_user(pool).await.unwrap();
        votes::cast_vote(pool, c.id, c.story_id, voter.id, VoteType::Upvote).await.unwrap();
    }
    for _ in 0..2 {
        let voter = create_unique_test_user(pool).await.unwrap();
        votes::cast_vote(pool, c.id, c.story_id, voter.id, VoteType::Downvote).await.unwrap();
    }

    let all = votes::list_for_contribution(pool, c.id).await.unwrap();
    let stored = contributions::get_contribution(pool, c.id).await.unwrap().unwrap();

    let upvotes = all.iter().filter(|v| v.vote_type == VoteType::Upvote).count() as i64;
    let downvotes = all.iter().filter(|v| v.vote_type == VoteType::Downvote).count() as i64;

    assert_eq!(stored.votes.upvotes, upvotes);
    assert_eq!(stored.votes.downvotes, downvotes);
    assert_eq!((upvotes, downvotes), (3, 2));
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn test_self_voting_is_permitted() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let author = create_unique_test_user(pool).await.unwrap();
    let c = seed_contribution(pool, author.id).await;

    let outcome = votes::cast_vote(pool, c.id, c.story_id, author.id, VoteType::Upvote)
        .await
        .unwrap();
    assert_eq!(outcome.counts.upvotes, 1);
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn test_votes_cascade_with_contribution_delete() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let author = create_unique_test_user(pool).await.unwrap();
    let voter = create_unique_test_user(pool).await.unwrap();
    let c = seed_contribution(pool, author.id).await;

    votes::cast_vote(pool, c.id, c.story_id, voter.id, VoteType::Upvote).await.unwrap();
    contributions::delete_contribution(pool, c.id).await.unwrap();

    assert!(votes::find_vote(pool, c.id, voter.id).await.unwrap().is_none());
}
