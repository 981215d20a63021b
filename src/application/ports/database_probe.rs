use async_trait::async_trait;

#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    async fn ping(&self) -> anyhow::Result<()>;
}
