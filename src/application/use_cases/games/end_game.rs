use crate::application::ports::game_repository::GameRepository;
use crate::domain::games::game::Game;

pub struct EndGame<'a, R: GameRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: GameRepository + ?Sized> EndGame<'a, R> {
    /// Closes the session. Ending an unknown game is not an error; it yields `None`.
    pub async fn execute(&self, id: i64, score: Option<i32>) -> anyhow::Result<Option<Game>> {
        let game = self.repo.finish(id, score).await?;
        match &game {
            Some(g) => tracing::info!(game_id = g.id, score = ?g.score, "game_ended"),
            None => tracing::debug!(game_id = id, "end_requested_for_unknown_game"),
        }
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::games::mode::GameMode;
    use crate::infrastructure::memory::game_repository_memory::MemoryGameRepository;

    #[tokio::test]
    async fn ending_records_score_and_deactivates() {
        let repo = MemoryGameRepository::new();
        let game = repo.start(1, "player1", GameMode::Walls).await.unwrap();
        let uc = EndGame { repo: &repo };
        let ended = uc.execute(game.id, Some(500)).await.unwrap().unwrap();
        assert_eq!(ended.score, Some(500));
        assert!(!ended.is_active);
    }

    #[tokio::test]
    async fn ending_without_score_keeps_null() {
        let repo = MemoryGameRepository::new();
        let game = repo
            .start(1, "player1", GameMode::PassThrough)
            .await
            .unwrap();
        let uc = EndGame { repo: &repo };
        let ended = uc.execute(game.id, None).await.unwrap().unwrap();
        assert_eq!(ended.score, None);
        assert!(uc.execute(12345, None).await.unwrap().is_none());
    }
}
