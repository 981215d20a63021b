use async_trait::async_trait;

use crate::application::ports::database_probe::DatabaseProbe;
use crate::infrastructure::db::PgPool;

pub struct SqlxDatabaseProbe {
    pub pool: PgPool,
}

impl SqlxDatabaseProbe {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseProbe for SqlxDatabaseProbe {
    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
