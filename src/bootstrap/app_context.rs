use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::application::ports::database_probe::DatabaseProbe;
use crate::application::ports::game_repository::GameRepository;
use crate::application::ports::leaderboard_repository::LeaderboardRepository;
use crate::application::ports::todo_repository::TodoRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::seed::seed_defaults::SeedDefaults;
use crate::bootstrap::config::Config;
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::repositories::database_probe_sqlx::SqlxDatabaseProbe;
use crate::infrastructure::db::repositories::game_repository_sqlx::SqlxGameRepository;
use crate::infrastructure::db::repositories::leaderboard_repository_sqlx::SqlxLeaderboardRepository;
use crate::infrastructure::db::repositories::todo_repository_sqlx::SqlxTodoRepository;
use crate::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use crate::infrastructure::memory::database_probe_memory::MemoryDatabaseProbe;
use crate::infrastructure::memory::game_repository_memory::MemoryGameRepository;
use crate::infrastructure::memory::leaderboard_repository_memory::MemoryLeaderboardRepository;
use crate::infrastructure::memory::todo_repository_memory::MemoryTodoRepository;
use crate::infrastructure::memory::user_repository_memory::MemoryUserRepository;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    leaderboard_repo: Arc<dyn LeaderboardRepository>,
    game_repo: Arc<dyn GameRepository>,
    todo_repo: Arc<dyn TodoRepository>,
    database_probe: Arc<dyn DatabaseProbe>,
    seeded: OnceCell<()>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        leaderboard_repo: Arc<dyn LeaderboardRepository>,
        game_repo: Arc<dyn GameRepository>,
        todo_repo: Arc<dyn TodoRepository>,
        database_probe: Arc<dyn DatabaseProbe>,
    ) -> Self {
        Self {
            user_repo,
            leaderboard_repo,
            game_repo,
            todo_repo,
            database_probe,
            seeded: OnceCell::new(),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(SqlxUserRepository::new(pool.clone())),
            Arc::new(SqlxLeaderboardRepository::new(pool.clone())),
            Arc::new(SqlxGameRepository::new(pool.clone())),
            Arc::new(SqlxTodoRepository::new(pool.clone())),
            Arc::new(SqlxDatabaseProbe::new(pool)),
        )
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryUserRepository::new()),
            Arc::new(MemoryLeaderboardRepository::new()),
            Arc::new(MemoryGameRepository::new()),
            Arc::new(MemoryTodoRepository::new()),
            Arc::new(MemoryDatabaseProbe),
        )
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn leaderboard_repo(&self) -> Arc<dyn LeaderboardRepository> {
        self.services.leaderboard_repo.clone()
    }

    pub fn game_repo(&self) -> Arc<dyn GameRepository> {
        self.services.game_repo.clone()
    }

    pub fn todo_repo(&self) -> Arc<dyn TodoRepository> {
        self.services.todo_repo.clone()
    }

    pub fn database_probe(&self) -> Arc<dyn DatabaseProbe> {
        self.services.database_probe.clone()
    }

    /// Seeds default players the first time it is called against an empty store.
    /// A failed attempt is retried on the next call.
    pub async fn ensure_seeded(&self) -> anyhow::Result<()> {
        if !self.cfg.seed_defaults {
            return Ok(());
        }
        self.services
            .seeded
            .get_or_try_init(|| async {
                let users = self.user_repo();
                let leaderboard = self.leaderboard_repo();
                let uc = SeedDefaults {
                    users: users.as_ref(),
                    leaderboard: leaderboard.as_ref(),
                };
                uc.execute().await.map(|_| ())
            })
            .await?;
        Ok(())
    }
}
