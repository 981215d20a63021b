use crate::application::ports::leaderboard_repository::LeaderboardRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::passwords;
use crate::domain::games::mode::GameMode;

const DEFAULT_PASSWORD: &str = "pass123";

const DEFAULT_PLAYERS: [(&str, &str); 3] = [
    ("player1", "player1@test.com"),
    ("player2", "player2@test.com"),
    ("speedmaster", "speed@test.com"),
];

// (player index, score, mode)
const DEFAULT_SCORES: [(usize, i32, GameMode); 2] = [
    (0, 150, GameMode::Walls),
    (1, 230, GameMode::PassThrough),
];

/// Fills an empty user table with demo players and a couple of scores.
pub struct SeedDefaults<'a, U, L>
where
    U: UserRepository + ?Sized,
    L: LeaderboardRepository + ?Sized,
{
    pub users: &'a U,
    pub leaderboard: &'a L,
}

impl<'a, U, L> SeedDefaults<'a, U, L>
where
    U: UserRepository + ?Sized,
    L: LeaderboardRepository + ?Sized,
{
    /// Returns true when rows were inserted.
    pub async fn execute(&self) -> anyhow::Result<bool> {
        if self.users.count().await? > 0 {
            return Ok(false);
        }

        let hash = passwords::hash_password(DEFAULT_PASSWORD)?;
        let mut created = Vec::with_capacity(DEFAULT_PLAYERS.len());
        for (username, email) in DEFAULT_PLAYERS {
            created.push(self.users.create_user(username, email, &hash).await?);
        }

        for (idx, score, mode) in DEFAULT_SCORES {
            if let Some(user) = created.get(idx) {
                self.leaderboard
                    .insert(user.id, &user.username, score, mode)
                    .await?;
            }
        }

        tracing::info!(players = created.len(), "seeded_default_players");
        Ok(true)
    }
}
