use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::leaderboard_repository::LeaderboardRepository;
use crate::domain::games::mode::{GameMode, ModeFilter};
use crate::domain::leaderboard::entry::LeaderboardEntry;
use crate::infrastructure::db::PgPool;

pub struct SqlxLeaderboardRepository {
    pub pool: PgPool,
}

impl SqlxLeaderboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_entry(r: &PgRow) -> anyhow::Result<LeaderboardEntry> {
    let mode: String = r.get("mode");
    Ok(LeaderboardEntry {
        id: r.get("id"),
        user_id: r.get("user_id"),
        username: r.get("username"),
        score: r.get("score"),
        mode: mode.parse()?,
        date: r.get("date"),
    })
}

#[async_trait]
impl LeaderboardRepository for SqlxLeaderboardRepository {
    async fn insert(
        &self,
        user_id: i64,
        username: &str,
        score: i32,
        mode: GameMode,
    ) -> anyhow::Result<LeaderboardEntry> {
        let row = sqlx::query(
            r#"INSERT INTO leaderboard (user_id, username, score, mode) VALUES ($1, $2, $3, $4)
               RETURNING id, user_id, username, score, mode, date"#,
        )
        .bind(user_id)
        .bind(username)
        .bind(score)
        .bind(mode.as_str())
        .fetch_one(&self.pool)
        .await?;
        map_entry(&row)
    }

    async fn top(&self, filter: ModeFilter, limit: i64) -> anyhow::Result<Vec<LeaderboardEntry>> {
        let rows = match filter.mode() {
            Some(mode) => {
                sqlx::query(
                    r#"SELECT id, user_id, username, score, mode, date
                       FROM leaderboard
                       WHERE mode = $1
                       ORDER BY score DESC, date ASC, id ASC
                       LIMIT $2"#,
                )
                .bind(mode.as_str())
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"SELECT id, user_id, username, score, mode, date
                       FROM leaderboard
                       ORDER BY score DESC, date ASC, id ASC
                       LIMIT $1"#,
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };
        rows.iter().map(map_entry).collect()
    }

    async fn best_for_user(&self, user_id: i64, filter: ModeFilter) -> anyhow::Result<Option<i32>> {
        let best = match filter.mode() {
            Some(mode) => {
                sqlx::query_scalar::<_, Option<i32>>(
                    r#"SELECT MAX(score) FROM leaderboard WHERE user_id = $1 AND mode = $2"#,
                )
                .bind(user_id)
                .bind(mode.as_str())
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, Option<i32>>(
                    r#"SELECT MAX(score) FROM leaderboard WHERE user_id = $1"#,
                )
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?
            }
        };
        Ok(best)
    }
}
