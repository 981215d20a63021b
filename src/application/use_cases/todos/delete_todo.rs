use crate::application::ports::todo_repository::TodoRepository;

pub struct DeleteTodo<'a, R: TodoRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TodoRepository + ?Sized> DeleteTodo<'a, R> {
    pub async fn execute(&self, id: i64) -> anyhow::Result<bool> {
        self.repo.delete(id).await
    }
}
