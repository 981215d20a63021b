pub mod database_probe;
pub mod game_repository;
pub mod leaderboard_repository;
pub mod todo_repository;
pub mod user_repository;
