use crate::application::ports::user_repository::{UserRepository, UserRow};

/// Picks the player a score or game is recorded for: the token's user when one
/// is known, otherwise the first registered user.
pub struct ResolvePlayer<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> ResolvePlayer<'a, R> {
    pub async fn execute(&self, token_user: Option<i64>) -> anyhow::Result<Option<UserRow>> {
        if let Some(id) = token_user {
            if let Some(user) = self.repo.find_by_id(id).await? {
                return Ok(Some(user));
            }
            tracing::debug!(user_id = id, "token_user_missing_falling_back");
        }
        self.repo.first_user().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::user_repository_memory::MemoryUserRepository;

    #[tokio::test]
    async fn prefers_token_user_then_first_user() {
        let repo = MemoryUserRepository::new();
        let uc = ResolvePlayer { repo: &repo };
        assert!(uc.execute(None).await.unwrap().is_none());

        let first = repo.create_user("a", "a@test.com", "h").await.unwrap();
        let second = repo.create_user("b", "b@test.com", "h").await.unwrap();

        assert_eq!(uc.execute(None).await.unwrap().unwrap().id, first.id);
        assert_eq!(
            uc.execute(Some(second.id)).await.unwrap().unwrap().id,
            second.id
        );
        assert_eq!(uc.execute(Some(999)).await.unwrap().unwrap().id, first.id);
    }
}
