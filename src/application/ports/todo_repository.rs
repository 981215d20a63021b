use async_trait::async_trait;

use crate::domain::todos::todo::{NewTodo, Todo, TodoChanges};

#[async_trait]
pub trait TodoRepository: Send + Sync {
    // Newest first
    async fn list(&self) -> anyhow::Result<Vec<Todo>>;
    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Todo>>;
    async fn create(&self, todo: &NewTodo) -> anyhow::Result<Todo>;
    async fn update(&self, id: i64, changes: &TodoChanges) -> anyhow::Result<Option<Todo>>;
    async fn set_resolved(&self, id: i64, resolved: bool) -> anyhow::Result<Option<Todo>>;
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
}
