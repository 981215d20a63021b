use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::application::ports::leaderboard_repository::LeaderboardRepository;
use crate::domain::games::mode::{GameMode, ModeFilter};
use crate::domain::leaderboard::entry::LeaderboardEntry;
use crate::infrastructure::memory::Table;

#[derive(Debug, Default)]
pub struct MemoryLeaderboardRepository {
    entries: RwLock<Table<LeaderboardEntry>>,
}

impl MemoryLeaderboardRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeaderboardRepository for MemoryLeaderboardRepository {
    async fn insert(
        &self,
        user_id: i64,
        username: &str,
        score: i32,
        mode: GameMode,
    ) -> anyhow::Result<LeaderboardEntry> {
        let mut entries = self.entries.write().await;
        let id = entries.allocate_id();
        let entry = LeaderboardEntry {
            id,
            user_id,
            username: username.to_string(),
            score,
            mode,
            date: Utc::now(),
        };
        entries.insert(id, entry.clone());
        Ok(entry)
    }

    async fn top(&self, filter: ModeFilter, limit: i64) -> anyhow::Result<Vec<LeaderboardEntry>> {
        let entries = self.entries.read().await;
        let mut out: Vec<LeaderboardEntry> = entries
            .values()
            .filter(|e| filter.matches(e.mode))
            .cloned()
            .collect();
        out.sort_by_key(|e| (Reverse(e.score), e.date, e.id));
        out.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        Ok(out)
    }

    async fn best_for_user(&self, user_id: i64, filter: ModeFilter) -> anyhow::Result<Option<i32>> {
        let entries = self.entries.read().await;
        Ok(entries
            .values()
            .filter(|e| e.user_id == user_id && filter.matches(e.mode))
            .map(|e| e.score)
            .max())
    }
}
