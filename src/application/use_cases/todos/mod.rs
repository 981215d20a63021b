pub mod create_todo;
pub mod delete_todo;
pub mod list_todos;
pub mod toggle_todo;
pub mod update_todo;
