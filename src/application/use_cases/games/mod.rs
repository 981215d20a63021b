pub mod end_game;
pub mod get_game;
pub mod list_active_games;
pub mod start_game;
