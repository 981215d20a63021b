use async_trait::async_trait;

use crate::application::ports::database_probe::DatabaseProbe;

#[derive(Debug, Default)]
pub struct MemoryDatabaseProbe;

#[async_trait]
impl DatabaseProbe for MemoryDatabaseProbe {
    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
