use async_trait::async_trait;

use crate::domain::games::game::Game;
use crate::domain::games::mode::GameMode;

#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn start(&self, user_id: i64, username: &str, mode: GameMode) -> anyhow::Result<Game>;
    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Game>>;
    // Returns None when the game does not exist
    async fn finish(&self, id: i64, score: Option<i32>) -> anyhow::Result<Option<Game>>;
    async fn list_active(&self) -> anyhow::Result<Vec<Game>>;
}
