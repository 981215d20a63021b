use crate::application::ports::todo_repository::TodoRepository;
use crate::domain::todos::todo::Todo;

pub struct ToggleTodo<'a, R: TodoRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TodoRepository + ?Sized> ToggleTodo<'a, R> {
    pub async fn execute(&self, id: i64) -> anyhow::Result<Option<Todo>> {
        let Some(todo) = self.repo.get_by_id(id).await? else {
            return Ok(None);
        };
        self.repo.set_resolved(id, !todo.resolved).await
    }
}
