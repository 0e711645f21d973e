//! Authentication test helpers
//!
//! Provides utilities for creating test users and generating tokens.

use sqlx::PgPool;
use uuid::Uuid;

use storyloom::backend::auth::sessions::create_token;
use storyloom::backend::auth::users::create_user;
use storyloom::shared::user::UserRole;

/// Test user credentials
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub token: String,
}

/// Create a test user in the database
pub async fn create_test_user(
    pool: &PgPool,
    username: &str,
    email: &str,
) -> Result<TestUser, Box<dyn std::error::Error>> {
    let password_hash = bcrypt::hash("test_password_123", bcrypt::DEFAULT_COST)?;

    let user = create_user(pool, username.to_string(), email.to_string(), password_hash).await?;

    let token = create_token(user.id, &user.username, &user.email, UserRole::User)?;

    Ok(TestUser {
        id: user.id,
        username: user.username,
        email: user.email,
        token,
    })
}

/// Create a test user with a unique username and email
pub async fn create_unique_test_user(
    pool: &PgPool,
) -> Result<TestUser, Box<dyn std::error::Error>> {
    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("writer_{}", &suffix[..8]);
    let email = format!("test_{}@example.com", suffix);
    create_test_user(pool, &username, &email).await
}

/// Generate a bearer token without touching the database
pub fn make_token(user_id: Uuid, username: &str, role: UserRole) -> String {
    create_token(user_id, username, &format!("{}@example.com", username), role)
        .expect("Failed to create test token")
}
