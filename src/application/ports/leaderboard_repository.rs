use async_trait::async_trait;

use crate::domain::games::mode::{GameMode, ModeFilter};
use crate::domain::leaderboard::entry::LeaderboardEntry;

#[async_trait]
pub trait LeaderboardRepository: Send + Sync {
    async fn insert(
        &self,
        user_id: i64,
        username: &str,
        score: i32,
        mode: GameMode,
    ) -> anyhow::Result<LeaderboardEntry>;

    // Highest score first, earlier date wins ties
    async fn top(&self, filter: ModeFilter, limit: i64) -> anyhow::Result<Vec<LeaderboardEntry>>;

    async fn best_for_user(&self, user_id: i64, filter: ModeFilter) -> anyhow::Result<Option<i32>>;
}
