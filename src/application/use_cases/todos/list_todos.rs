use crate::application::ports::todo_repository::TodoRepository;
use crate::domain::todos::todo::Todo;

pub struct ListTodos<'a, R: TodoRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TodoRepository + ?Sized> ListTodos<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<Todo>> {
        self.repo.list().await
    }
}
