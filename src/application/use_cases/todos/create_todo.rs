use crate::application::dto::todos::{TodoFormDto, TodoFormError, check_title, parse_due_date};
use crate::application::ports::todo_repository::TodoRepository;
use crate::domain::todos::todo::{NewTodo, Todo};

pub struct CreateTodo<'a, R: TodoRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TodoRepository + ?Sized> CreateTodo<'a, R> {
    /// A blank title creates nothing and yields `Ok(None)`.
    pub async fn execute(&self, form: &TodoFormDto) -> Result<Option<Todo>, TodoFormError> {
        let title = match form.title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => return Ok(None),
        };
        check_title(title)?;
        let due_date = parse_due_date(form.due_date.as_deref())?;
        let new = NewTodo {
            title: title.to_string(),
            description: form.description.clone().unwrap_or_default(),
            due_date,
        };
        let todo = self
            .repo
            .create(&new)
            .await
            .map_err(TodoFormError::Internal)?;
        tracing::debug!(todo_id = todo.id, "todo_created");
        Ok(Some(todo))
    }
}
