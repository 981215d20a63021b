pub mod auth;
pub mod games;
pub mod leaderboard;
pub mod seed;
pub mod todos;
