use crate::application::ports::game_repository::GameRepository;
use crate::domain::games::game::Game;

pub struct GetGame<'a, R: GameRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: GameRepository + ?Sized> GetGame<'a, R> {
    pub async fn execute(&self, id: i64) -> anyhow::Result<Option<Game>> {
        self.repo.get_by_id(id).await
    }
}
