use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::application::ports::todo_repository::TodoRepository;
use crate::domain::todos::todo::{NewTodo, Todo, TodoChanges};
use crate::infrastructure::memory::Table;

#[derive(Debug, Default)]
pub struct MemoryTodoRepository {
    todos: RwLock<Table<Todo>>,
}

impl MemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for MemoryTodoRepository {
    async fn list(&self) -> anyhow::Result<Vec<Todo>> {
        let todos = self.todos.read().await;
        let mut out: Vec<Todo> = todos.values().cloned().collect();
        out.sort_by_key(|t| Reverse((t.created_at, t.id)));
        Ok(out)
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Todo>> {
        let todos = self.todos.read().await;
        Ok(todos.get(id).cloned())
    }

    async fn create(&self, todo: &NewTodo) -> anyhow::Result<Todo> {
        let mut todos = self.todos.write().await;
        let id = todos.allocate_id();
        let now = Utc::now();
        let row = Todo {
            id,
            title: todo.title.clone(),
            description: todo.description.clone(),
            due_date: todo.due_date,
            resolved: false,
            created_at: now,
            updated_at: now,
        };
        todos.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, changes: &TodoChanges) -> anyhow::Result<Option<Todo>> {
        let mut todos = self.todos.write().await;
        Ok(todos.get_mut(id).map(|todo| {
            todo.title = changes.title.clone();
            todo.description = changes.description.clone();
            todo.due_date = changes.due_date;
            todo.updated_at = Utc::now();
            todo.clone()
        }))
    }

    async fn set_resolved(&self, id: i64, resolved: bool) -> anyhow::Result<Option<Todo>> {
        let mut todos = self.todos.write().await;
        Ok(todos.get_mut(id).map(|todo| {
            todo.resolved = resolved;
            todo.updated_at = Utc::now();
            todo.clone()
        }))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let mut todos = self.todos.write().await;
        Ok(todos.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_todo(title: &str) -> NewTodo {
        NewTodo {
            title: title.into(),
            description: String::new(),
            due_date: None,
        }
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let repo = MemoryTodoRepository::new();
        repo.create(&new_todo("First TODO")).await.unwrap();
        repo.create(&new_todo("Second TODO")).await.unwrap();
        let titles: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["Second TODO", "First TODO"]);
    }

    #[tokio::test]
    async fn new_todos_are_unresolved() {
        let repo = MemoryTodoRepository::new();
        let todo = repo.create(&new_todo("Test TODO")).await.unwrap();
        assert!(!todo.resolved);
    }

    #[tokio::test]
    async fn delete_reports_missing_rows() {
        let repo = MemoryTodoRepository::new();
        let todo = repo.create(&new_todo("To Be Deleted")).await.unwrap();
        assert!(repo.delete(todo.id).await.unwrap());
        assert!(!repo.delete(todo.id).await.unwrap());
    }
}
