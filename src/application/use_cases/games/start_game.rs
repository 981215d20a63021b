use crate::application::ports::game_repository::GameRepository;
use crate::application::ports::user_repository::UserRow;
use crate::domain::games::game::Game;
use crate::domain::games::mode::GameMode;

pub struct StartGame<'a, R: GameRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: GameRepository + ?Sized> StartGame<'a, R> {
    pub async fn execute(&self, player: &UserRow, mode: GameMode) -> anyhow::Result<Game> {
        let game = self.repo.start(player.id, &player.username, mode).await?;
        tracing::info!(game_id = game.id, user_id = player.id, %mode, "game_started");
        Ok(game)
    }
}
