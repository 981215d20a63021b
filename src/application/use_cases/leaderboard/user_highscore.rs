use crate::application::ports::leaderboard_repository::LeaderboardRepository;
use crate::application::ports::user_repository::UserRow;
use crate::domain::games::mode::ModeFilter;

pub struct UserHighScore<'a, R: LeaderboardRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LeaderboardRepository + ?Sized> UserHighScore<'a, R> {
    /// Best score of `player` for the filter; 0 without a player or entries.
    pub async fn execute(&self, player: Option<&UserRow>, filter: ModeFilter) -> anyhow::Result<i32> {
        let Some(player) = player else {
            return Ok(0);
        };
        Ok(self
            .repo
            .best_for_user(player.id, filter)
            .await?
            .unwrap_or(0))
    }
}
