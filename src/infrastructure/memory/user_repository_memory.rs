use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::application::ports::user_repository::{UserConflict, UserRepository, UserRow};
use crate::infrastructure::memory::Table;

#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: RwLock<Table<UserRow>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn without_hash(row: &UserRow) -> UserRow {
    UserRow {
        password_hash: None,
        ..row.clone()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<UserRow> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == username) {
            return Err(UserConflict::Username.into());
        }
        if users.values().any(|u| u.email == email) {
            return Err(UserConflict::Email.into());
        }
        let id = users.allocate_id();
        let row = UserRow {
            id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: Some(password_hash.to_string()),
            created_at: Utc::now(),
        };
        users.insert(id, row.clone());
        Ok(row)
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<UserRow>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<UserRow>> {
        let users = self.users.read().await;
        Ok(users.get(id).map(without_hash))
    }

    async fn first_user(&self) -> anyhow::Result<Option<UserRow>> {
        let users = self.users.read().await;
        Ok(users.values().next().map(without_hash))
    }

    async fn count(&self) -> anyhow::Result<i64> {
        let users = self.users.read().await;
        Ok(users.len() as i64)
    }
}
