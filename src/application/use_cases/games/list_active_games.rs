use crate::application::ports::game_repository::GameRepository;
use crate::domain::games::game::Game;

pub struct ListActiveGames<'a, R: GameRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: GameRepository + ?Sized> ListActiveGames<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<Game>> {
        self.repo.list_active().await
    }
}
