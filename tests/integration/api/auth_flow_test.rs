//! Authentication flow tests (database-backed)
//!
//! Run with `cargo test -- --ignored` against a PostgreSQL instance
//! reachable through `DATABASE_URL`.

use serial_test::serial;

use storyloom::backend::auth::sessions::verify_token;
use storyloom::backend::auth::users::{get_user_by_email, get_user_by_username};

use crate::common::auth_helpers::{create_test_user, create_unique_test_user};
use crate::common::database::TestDatabase;

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn test_created_user_is_retrievable() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let user = create_test_user(pool, "margot", "margot@example.com").await.unwrap();

    let by_email = get_user_by_email(pool, "margot@example.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);

    let by_username = get_user_by_username(pool, "margot").await.unwrap().unwrap();
    assert_eq!(by_username.id, user.id);
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn test_issued_token_identifies_user() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    let user = create_unique_test_user(pool).await.unwrap();

    let claims = verify_token(&user.token).unwrap();
    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.username, user.username);
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostgreSQL test database"]
async fn test_duplicate_email_rejected_by_schema() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    create_test_user(pool, "first", "same@example.com").await.unwrap();
    let result = create_test_user(pool, "second", "same@example.com").await;
    assert!(result.is_err());
}
