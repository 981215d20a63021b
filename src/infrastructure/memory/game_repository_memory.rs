use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::application::ports::game_repository::GameRepository;
use crate::domain::games::game::Game;
use crate::domain::games::mode::GameMode;
use crate::infrastructure::memory::Table;

#[derive(Debug, Default)]
pub struct MemoryGameRepository {
    games: RwLock<Table<Game>>,
}

impl MemoryGameRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameRepository for MemoryGameRepository {
    async fn start(&self, user_id: i64, username: &str, mode: GameMode) -> anyhow::Result<Game> {
        let mut games = self.games.write().await;
        let id = games.allocate_id();
        let game = Game {
            id,
            user_id,
            username: username.to_string(),
            mode,
            start_time: Utc::now(),
            end_time: None,
            score: None,
            is_active: true,
        };
        games.insert(id, game.clone());
        Ok(game)
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Game>> {
        let games = self.games.read().await;
        Ok(games.get(id).cloned())
    }

    async fn finish(&self, id: i64, score: Option<i32>) -> anyhow::Result<Option<Game>> {
        let mut games = self.games.write().await;
        Ok(games.get_mut(id).map(|game| {
            game.end_time = Some(Utc::now());
            game.score = score;
            game.is_active = false;
            game.clone()
        }))
    }

    async fn list_active(&self) -> anyhow::Result<Vec<Game>> {
        let games = self.games.read().await;
        let mut out: Vec<Game> = games.values().filter(|g| g.is_active).cloned().collect();
        out.sort_by_key(|g| Reverse((g.start_time, g.id)));
        Ok(out)
    }
}
