use crate::application::ports::leaderboard_repository::LeaderboardRepository;
use crate::domain::games::mode::ModeFilter;
use crate::domain::leaderboard::entry::LeaderboardEntry;

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 100;

pub struct ListLeaderboard<'a, R: LeaderboardRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LeaderboardRepository + ?Sized> ListLeaderboard<'a, R> {
    pub async fn execute(
        &self,
        filter: ModeFilter,
        limit: Option<i64>,
    ) -> anyhow::Result<Vec<LeaderboardEntry>> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        self.repo.top(filter, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::games::mode::GameMode;
    use crate::infrastructure::memory::leaderboard_repository_memory::MemoryLeaderboardRepository;

    #[tokio::test]
    async fn clamps_limit() {
        let repo = MemoryLeaderboardRepository::new();
        for score in 0..120 {
            repo.insert(1, "p", score, GameMode::Walls).await.unwrap();
        }
        let uc = ListLeaderboard { repo: &repo };
        assert_eq!(uc.execute(ModeFilter::All, None).await.unwrap().len(), 50);
        assert_eq!(
            uc.execute(ModeFilter::All, Some(1000)).await.unwrap().len(),
            100
        );
        assert_eq!(uc.execute(ModeFilter::All, Some(0)).await.unwrap().len(), 1);
    }
}
