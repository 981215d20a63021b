use crate::application::ports::leaderboard_repository::LeaderboardRepository;
use crate::application::ports::user_repository::UserRow;
use crate::domain::games::mode::GameMode;
use crate::domain::leaderboard::entry::LeaderboardEntry;

pub struct SubmitScore<'a, R: LeaderboardRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LeaderboardRepository + ?Sized> SubmitScore<'a, R> {
    pub async fn execute(
        &self,
        player: &UserRow,
        score: i32,
        mode: GameMode,
    ) -> anyhow::Result<LeaderboardEntry> {
        let entry = self
            .repo
            .insert(player.id, &player.username, score, mode)
            .await?;
        tracing::debug!(entry_id = entry.id, user_id = player.id, score, %mode, "score_submitted");
        Ok(entry)
    }
}
