use chrono::{DateTime, Utc};

use crate::domain::games::mode::GameMode;

#[derive(Debug, Clone)]
pub struct Game {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub mode: GameMode,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub score: Option<i32>,
    pub is_active: bool,
}
