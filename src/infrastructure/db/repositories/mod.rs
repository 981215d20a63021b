pub mod database_probe_sqlx;
pub mod game_repository_sqlx;
pub mod leaderboard_repository_sqlx;
pub mod todo_repository_sqlx;
pub mod user_repository_sqlx;
