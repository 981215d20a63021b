use crate::application::ports::user_repository::{UserRepository, UserRow};
use crate::application::services::passwords;

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    pub async fn execute(&self, req: &LoginRequest) -> anyhow::Result<Option<UserRow>> {
        let row = match self.repo.find_by_username(req.username.trim()).await? {
            Some(r) => r,
            None => return Ok(None),
        };
        let hash = row.password_hash.clone().unwrap_or_default();
        if passwords::verify_password(&req.password, &hash)? {
            Ok(Some(UserRow {
                password_hash: None,
                ..row
            }))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::user_repository_memory::MemoryUserRepository;

    async fn repo_with_user() -> MemoryUserRepository {
        let repo = MemoryUserRepository::new();
        let hash = passwords::hash_password("password123").unwrap();
        repo.create_user("testuser", "test@example.com", &hash)
            .await
            .unwrap();
        repo
    }

    #[tokio::test]
    async fn accepts_correct_password() {
        let repo = repo_with_user().await;
        let uc = Login { repo: &repo };
        let user = uc
            .execute(&LoginRequest {
                username: "testuser".into(),
                password: "password123".into(),
            })
            .await
            .unwrap()
            .expect("user");
        assert_eq!(user.email, "test@example.com");
        assert!(user.password_hash.is_none());
    }

    #[tokio::test]
    async fn rejects_wrong_password_and_unknown_user() {
        let repo = repo_with_user().await;
        let uc = Login { repo: &repo };
        let wrong = uc
            .execute(&LoginRequest {
                username: "testuser".into(),
                password: "nope".into(),
            })
            .await
            .unwrap();
        assert!(wrong.is_none());
        let unknown = uc
            .execute(&LoginRequest {
                username: "nonexistent".into(),
                password: "wrongpass".into(),
            })
            .await
            .unwrap();
        assert!(unknown.is_none());
    }

    #[tokio::test]
    async fn username_is_trimmed_like_signup() {
        let repo = repo_with_user().await;
        let uc = Login { repo: &repo };
        let user = uc
            .execute(&LoginRequest {
                username: "  testuser ".into(),
                password: "password123".into(),
            })
            .await
            .unwrap();
        assert!(user.is_some());
    }
}
