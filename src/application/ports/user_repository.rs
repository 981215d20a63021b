use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Returned (inside `anyhow::Error`) by `create_user` when a unique column collides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserConflict {
    #[error("username already taken")]
    Username,
    #[error("email already registered")]
    Email,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<UserRow>;
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<UserRow>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<UserRow>>;
    // Lowest id; stands in for the player when no token is presented
    async fn first_user(&self) -> anyhow::Result<Option<UserRow>>;
    async fn count(&self) -> anyhow::Result<i64>;
}
