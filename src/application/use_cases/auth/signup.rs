use once_cell::sync::Lazy;
use regex::Regex;

use crate::application::ports::user_repository::{UserConflict, UserRepository, UserRow};
use crate::application::services::passwords;

pub const USERNAME_MAX_CHARS: usize = 255;
pub const EMAIL_MAX_CHARS: usize = 255;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
});

#[derive(thiserror::Error, Debug)]
pub enum SignupError {
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Email already registered")]
    EmailTaken,
    #[error("{0}")]
    Invalid(&'static str),
    #[error("failed to create user")]
    Internal(#[source] anyhow::Error),
}

pub struct Signup<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Signup<'a, R> {
    pub async fn execute(&self, req: &SignupRequest) -> Result<UserRow, SignupError> {
        let username = req.username.trim();
        let email = req.email.trim();
        if username.is_empty() {
            return Err(SignupError::Invalid("Username is required"));
        }
        if username.chars().count() > USERNAME_MAX_CHARS {
            return Err(SignupError::Invalid("Username is too long"));
        }
        if req.password.is_empty() {
            return Err(SignupError::Invalid("Password is required"));
        }
        if email.chars().count() > EMAIL_MAX_CHARS {
            return Err(SignupError::Invalid("Email is too long"));
        }
        if !EMAIL_RE.is_match(email) {
            return Err(SignupError::Invalid("Invalid email address"));
        }

        if self
            .repo
            .find_by_username(username)
            .await
            .map_err(SignupError::Internal)?
            .is_some()
        {
            return Err(SignupError::UsernameTaken);
        }
        if self
            .repo
            .find_by_email(email)
            .await
            .map_err(SignupError::Internal)?
            .is_some()
        {
            return Err(SignupError::EmailTaken);
        }

        let hash = passwords::hash_password(&req.password).map_err(SignupError::Internal)?;
        let user = self
            .repo
            .create_user(username, email, &hash)
            .await
            .map_err(|e| {
                // lost a race with a concurrent signup
                match e.downcast_ref::<UserConflict>().copied() {
                    Some(UserConflict::Username) => SignupError::UsernameTaken,
                    Some(UserConflict::Email) => SignupError::EmailTaken,
                    None => SignupError::Internal(e),
                }
            })?;
        tracing::info!(user_id = user.id, username = %user.username, "user_signed_up");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::user_repository_memory::MemoryUserRepository;

    fn req(username: &str, email: &str) -> SignupRequest {
        SignupRequest {
            username: username.into(),
            email: email.into(),
            password: "pass123".into(),
        }
    }

    #[tokio::test]
    async fn creates_user_with_hashed_password() {
        let repo = MemoryUserRepository::new();
        let uc = Signup { repo: &repo };
        let user = uc
            .execute(&req("newuser", "new@example.com"))
            .await
            .unwrap();
        assert_eq!(user.username, "newuser");
        let stored = repo.find_by_username("newuser").await.unwrap().unwrap();
        assert_ne!(stored.password_hash.as_deref(), Some("pass123"));
    }

    #[tokio::test]
    async fn username_conflict_is_reported_before_email() {
        let repo = MemoryUserRepository::new();
        let uc = Signup { repo: &repo };
        uc.execute(&req("duplicate", "first@example.com"))
            .await
            .unwrap();
        let err = uc
            .execute(&req("duplicate", "first@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, SignupError::UsernameTaken));
    }

    #[tokio::test]
    async fn email_conflict() {
        let repo = MemoryUserRepository::new();
        let uc = Signup { repo: &repo };
        uc.execute(&req("user1", "duplicate@example.com"))
            .await
            .unwrap();
        let err = uc
            .execute(&req("user2", "duplicate@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, SignupError::EmailTaken));
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[tokio::test]
    async fn rejects_malformed_input() {
        let repo = MemoryUserRepository::new();
        let uc = Signup { repo: &repo };
        assert!(matches!(
            uc.execute(&req("  ", "a@b.c")).await.unwrap_err(),
            SignupError::Invalid(_)
        ));
        assert!(matches!(
            uc.execute(&req("someone", "not-an-email")).await.unwrap_err(),
            SignupError::Invalid(_)
        ));
    }

    #[tokio::test]
    async fn rejects_overlong_username_and_email() {
        let repo = MemoryUserRepository::new();
        let uc = Signup { repo: &repo };
        let long_name = "u".repeat(USERNAME_MAX_CHARS + 1);
        let err = uc
            .execute(&req(&long_name, "long@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Username is too long");

        let long_email = format!("{}@example.com", "e".repeat(EMAIL_MAX_CHARS));
        let err = uc.execute(&req("someone", &long_email)).await.unwrap_err();
        assert_eq!(err.to_string(), "Email is too long");

        let edge = "u".repeat(USERNAME_MAX_CHARS);
        assert!(uc.execute(&req(&edge, "edge@example.com")).await.is_ok());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    /// Lookups miss, as when another signup commits between check and insert.
    struct RacingRepo {
        inner: MemoryUserRepository,
    }

    #[async_trait::async_trait]
    impl UserRepository for RacingRepo {
        async fn create_user(
            &self,
            username: &str,
            email: &str,
            password_hash: &str,
        ) -> anyhow::Result<UserRow> {
            self.inner.create_user(username, email, password_hash).await
        }
        async fn find_by_username(&self, _: &str) -> anyhow::Result<Option<UserRow>> {
            Ok(None)
        }
        async fn find_by_email(&self, _: &str) -> anyhow::Result<Option<UserRow>> {
            Ok(None)
        }
        async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<UserRow>> {
            self.inner.find_by_id(id).await
        }
        async fn first_user(&self) -> anyhow::Result<Option<UserRow>> {
            self.inner.first_user().await
        }
        async fn count(&self) -> anyhow::Result<i64> {
            self.inner.count().await
        }
    }

    #[tokio::test]
    async fn insert_conflicts_map_to_taken_errors() {
        let repo = RacingRepo {
            inner: MemoryUserRepository::new(),
        };
        repo.inner
            .create_user("racer", "racer@example.com", "h")
            .await
            .unwrap();
        let uc = Signup { repo: &repo };

        let err = uc
            .execute(&req("racer", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, SignupError::UsernameTaken));

        let err = uc
            .execute(&req("other", "racer@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, SignupError::EmailTaken));
    }
}
