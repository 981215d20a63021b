use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use htmlescape::{encode_attribute as escape_attr, encode_minimal as escape_html};
use serde::Deserialize;

use crate::application::dto::todos::{TodoFormDto, TodoFormError};
use crate::application::use_cases::todos::create_todo::CreateTodo;
use crate::application::use_cases::todos::delete_todo::DeleteTodo;
use crate::application::use_cases::todos::list_todos::ListTodos;
use crate::application::use_cases::todos::toggle_todo::ToggleTodo;
use crate::application::use_cases::todos::update_todo::UpdateTodo;
use crate::bootstrap::app_context::AppContext;
use crate::domain::todos::todo::{TITLE_MAX_CHARS, Todo};
use crate::presentation::http::error::ApiError;

pub const LIST_PATH: &str = "/todos/";

#[derive(Debug, Default, Deserialize)]
pub struct TodoForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
}

impl From<TodoForm> for TodoFormDto {
    fn from(f: TodoForm) -> Self {
        TodoFormDto {
            title: f.title,
            description: f.description,
            due_date: f.due_date,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/todos", get(list_todos))
        .route("/todos/", get(list_todos))
        .route("/todos/create/", post(create_todo))
        .route("/todos/update/:id/", post(update_todo))
        .route("/todos/delete/:id/", post(delete_todo))
        .route("/todos/toggle/:id/", post(toggle_todo))
        .with_state(ctx)
}

async fn index() -> Response {
    redirect_to_list()
}

#[utoipa::path(
    get,
    path = "/todos/",
    tag = "Todos",
    responses((status = 200, description = "HTML page listing to-dos, newest first", body = String, content_type = "text/html"))
)]
pub async fn list_todos(State(ctx): State<AppContext>) -> Result<Html<String>, ApiError> {
    let repo = ctx.todo_repo();
    let uc = ListTodos {
        repo: repo.as_ref(),
    };
    let todos = uc.execute().await?;
    Ok(Html(render_list_page(&todos)))
}

#[utoipa::path(
    post,
    path = "/todos/create/",
    tag = "Todos",
    responses(
        (status = 302, description = "Redirect to the list"),
        (status = 400, description = "Malformed due date or over-long title")
    )
)]
pub async fn create_todo(
    State(ctx): State<AppContext>,
    Form(form): Form<TodoForm>,
) -> Result<Response, ApiError> {
    let repo = ctx.todo_repo();
    let uc = CreateTodo {
        repo: repo.as_ref(),
    };
    uc.execute(&form.into()).await.map_err(form_error)?;
    Ok(redirect_to_list())
}

#[utoipa::path(
    post,
    path = "/todos/update/{id}/",
    tag = "Todos",
    params(("id" = i64, Path, description = "To-do ID")),
    responses(
        (status = 302, description = "Redirect to the list"),
        (status = 404, description = "Unknown to-do")
    )
)]
pub async fn update_todo(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
    Form(form): Form<TodoForm>,
) -> Result<Response, ApiError> {
    let repo = ctx.todo_repo();
    let uc = UpdateTodo {
        repo: repo.as_ref(),
    };
    uc.execute(id, &form.into())
        .await
        .map_err(form_error)?
        .ok_or_else(not_found)?;
    Ok(redirect_to_list())
}

#[utoipa::path(
    post,
    path = "/todos/delete/{id}/",
    tag = "Todos",
    params(("id" = i64, Path, description = "To-do ID")),
    responses(
        (status = 302, description = "Redirect to the list"),
        (status = 404, description = "Unknown to-do")
    )
)]
pub async fn delete_todo(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let repo = ctx.todo_repo();
    let uc = DeleteTodo {
        repo: repo.as_ref(),
    };
    if !uc.execute(id).await? {
        return Err(not_found());
    }
    tracing::debug!(todo_id = id, "todo_deleted");
    Ok(redirect_to_list())
}

#[utoipa::path(
    post,
    path = "/todos/toggle/{id}/",
    tag = "Todos",
    params(("id" = i64, Path, description = "To-do ID")),
    responses(
        (status = 302, description = "Redirect to the list"),
        (status = 404, description = "Unknown to-do")
    )
)]
pub async fn toggle_todo(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let repo = ctx.todo_repo();
    let uc = ToggleTodo {
        repo: repo.as_ref(),
    };
    uc.execute(id).await?.ok_or_else(not_found)?;
    Ok(redirect_to_list())
}

fn not_found() -> ApiError {
    ApiError::not_found("Todo not found")
}

fn form_error(err: TodoFormError) -> ApiError {
    match err {
        TodoFormError::Internal(e) => ApiError::internal(&e),
        other => ApiError::bad_request(other.to_string()),
    }
}

fn redirect_to_list() -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, HeaderValue::from_static(LIST_PATH))],
    )
        .into_response()
}

fn render_list_page(todos: &[Todo]) -> String {
    let items: String = if todos.is_empty() {
        "<p class=\"empty\">Nothing to do yet.</p>\n".to_string()
    } else {
        let rows: Vec<String> = todos.iter().map(render_item).collect();
        format!("<ul class=\"todos\">\n{}</ul>\n", rows.concat())
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\" />\n<title>To-do list</title>\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n<style>.resolved .title {{ text-decoration: line-through; }}</style>\n</head>\n<body>\n<h1>To-do list</h1>\n<form method=\"post\" action=\"/todos/create/\">\n<input name=\"title\" placeholder=\"Title\" maxlength=\"{max}\" required />\n<textarea name=\"description\" placeholder=\"Description\"></textarea>\n<input type=\"date\" name=\"due_date\" />\n<button type=\"submit\">Add</button>\n</form>\n{items}</body>\n</html>\n",
        max = TITLE_MAX_CHARS,
        items = items,
    )
}

fn render_item(todo: &Todo) -> String {
    let due_attr = todo
        .due_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let due_text = if due_attr.is_empty() {
        String::new()
    } else {
        format!(" <span class=\"due\">due {}</span>", escape_html(&due_attr))
    };
    let (class, toggle_label) = if todo.resolved {
        ("resolved", "Reopen")
    } else {
        ("open", "Resolve")
    };

    format!(
        "<li class=\"{class}\" id=\"todo-{id}\">\n<span class=\"title\">{title}</span>{due}\n<p class=\"description\">{desc}</p>\n<form method=\"post\" action=\"/todos/toggle/{id}/\"><button type=\"submit\">{toggle}</button></form>\n<form method=\"post\" action=\"/todos/delete/{id}/\"><button type=\"submit\">Delete</button></form>\n<form method=\"post\" action=\"/todos/update/{id}/\">\n<input name=\"title\" value=\"{title_attr}\" maxlength=\"{max}\" required />\n<textarea name=\"description\">{desc}</textarea>\n<input type=\"date\" name=\"due_date\" value=\"{due_attr}\" />\n<button type=\"submit\">Save</button>\n</form>\n</li>\n",
        class = class,
        id = todo.id,
        title = escape_html(&todo.title),
        due = due_text,
        desc = escape_html(&todo.description),
        toggle = toggle_label,
        title_attr = escape_attr(&todo.title),
        due_attr = escape_attr(&due_attr),
        max = TITLE_MAX_CHARS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn todo(id: i64, title: &str, resolved: bool) -> Todo {
        let now = Utc::now();
        Todo {
            id,
            title: title.into(),
            description: "<b>bold</b>".into(),
            due_date: chrono::NaiveDate::from_ymd_opt(2025, 12, 31),
            resolved,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn escapes_user_text() {
        let html = render_list_page(&[todo(1, "<script>x</script>", false)]);
        assert!(!html.contains("<script>x</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(html.contains("due 2025-12-31"));
    }

    #[test]
    fn marks_resolved_items() {
        let html = render_list_page(&[todo(3, "Done", true)]);
        assert!(html.contains("class=\"resolved\" id=\"todo-3\""));
        assert!(html.contains("Reopen"));
        assert!(render_list_page(&[]).contains("Nothing to do yet."));
    }
}
