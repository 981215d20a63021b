pub mod list_leaderboard;
pub mod submit_score;
pub mod user_highscore;
