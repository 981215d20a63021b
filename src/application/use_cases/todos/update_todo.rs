use crate::application::dto::todos::{TodoFormDto, TodoFormError, check_title, parse_due_date};
use crate::application::ports::todo_repository::TodoRepository;
use crate::domain::todos::todo::{Todo, TodoChanges};

pub struct UpdateTodo<'a, R: TodoRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: TodoRepository + ?Sized> UpdateTodo<'a, R> {
    // Absent title/description keep the stored value; due_date is always replaced
    pub async fn execute(&self, id: i64, form: &TodoFormDto) -> Result<Option<Todo>, TodoFormError> {
        let Some(current) = self
            .repo
            .get_by_id(id)
            .await
            .map_err(TodoFormError::Internal)?
        else {
            return Ok(None);
        };
        let title = form.title.clone().unwrap_or(current.title);
        check_title(&title)?;
        let changes = TodoChanges {
            title,
            description: form.description.clone().unwrap_or(current.description),
            due_date: parse_due_date(form.due_date.as_deref())?,
        };
        self.repo
            .update(id, &changes)
            .await
            .map_err(TodoFormError::Internal)
    }
}
