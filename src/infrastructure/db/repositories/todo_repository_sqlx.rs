use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::todo_repository::TodoRepository;
use crate::domain::todos::todo::{NewTodo, Todo, TodoChanges};
use crate::infrastructure::db::PgPool;

pub struct SqlxTodoRepository {
    pub pool: PgPool,
}

impl SqlxTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_todo(r: &PgRow) -> Todo {
    Todo {
        id: r.get("id"),
        title: r.get("title"),
        description: r.get("description"),
        due_date: r.get("due_date"),
        resolved: r.get("resolved"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl TodoRepository for SqlxTodoRepository {
    async fn list(&self) -> anyhow::Result<Vec<Todo>> {
        let rows = sqlx::query(
            r#"SELECT id, title, description, due_date, resolved, created_at, updated_at
               FROM todos
               ORDER BY created_at DESC, id DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_todo).collect())
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Todo>> {
        let row = sqlx::query(
            r#"SELECT id, title, description, due_date, resolved, created_at, updated_at
               FROM todos WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_todo))
    }

    async fn create(&self, todo: &NewTodo) -> anyhow::Result<Todo> {
        let row = sqlx::query(
            r#"INSERT INTO todos (title, description, due_date) VALUES ($1, $2, $3)
               RETURNING id, title, description, due_date, resolved, created_at, updated_at"#,
        )
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.due_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_todo(&row))
    }

    async fn update(&self, id: i64, changes: &TodoChanges) -> anyhow::Result<Option<Todo>> {
        let row = sqlx::query(
            r#"UPDATE todos
               SET title = $2, description = $3, due_date = $4, updated_at = now()
               WHERE id = $1
               RETURNING id, title, description, due_date, resolved, created_at, updated_at"#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.due_date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_todo))
    }

    async fn set_resolved(&self, id: i64, resolved: bool) -> anyhow::Result<Option<Todo>> {
        let row = sqlx::query(
            r#"UPDATE todos SET resolved = $2, updated_at = now()
               WHERE id = $1
               RETURNING id, title, description, due_date, resolved, created_at, updated_at"#,
        )
        .bind(id)
        .bind(resolved)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_todo))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
