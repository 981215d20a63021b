use chrono::{DateTime, Utc};

use crate::domain::games::mode::GameMode;

#[derive(Debug, Clone)]
pub struct LeaderboardEntry {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub score: i32,
    pub mode: GameMode,
    pub date: DateTime<Utc>,
}
