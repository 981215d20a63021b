use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::game_repository::GameRepository;
use crate::domain::games::game::Game;
use crate::domain::games::mode::GameMode;
use crate::infrastructure::db::PgPool;

pub struct SqlxGameRepository {
    pub pool: PgPool,
}

impl SqlxGameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const GAME_COLUMNS: &str = "id, user_id, username, mode, start_time, end_time, score, is_active";

fn map_game(r: &PgRow) -> anyhow::Result<Game> {
    let mode: String = r.get("mode");
    Ok(Game {
        id: r.get("id"),
        user_id: r.get("user_id"),
        username: r.get("username"),
        mode: mode.parse()?,
        start_time: r.get("start_time"),
        end_time: r.get("end_time"),
        score: r.get("score"),
        is_active: r.get("is_active"),
    })
}

#[async_trait]
impl GameRepository for SqlxGameRepository {
    async fn start(&self, user_id: i64, username: &str, mode: GameMode) -> anyhow::Result<Game> {
        let sql = format!(
            "INSERT INTO games (user_id, username, mode, is_active) VALUES ($1, $2, $3, TRUE) RETURNING {GAME_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(user_id)
            .bind(username)
            .bind(mode.as_str())
            .fetch_one(&self.pool)
            .await?;
        map_game(&row)
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Game>> {
        let sql = format!("SELECT {GAME_COLUMNS} FROM games WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_game).transpose()
    }

    async fn finish(&self, id: i64, score: Option<i32>) -> anyhow::Result<Option<Game>> {
        let sql = format!(
            "UPDATE games SET end_time = now(), score = $2, is_active = FALSE WHERE id = $1 RETURNING {GAME_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(score)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_game).transpose()
    }

    async fn list_active(&self) -> anyhow::Result<Vec<Game>> {
        let sql = format!(
            "SELECT {GAME_COLUMNS} FROM games WHERE is_active ORDER BY start_time DESC, id DESC"
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(map_game).collect()
    }
}
