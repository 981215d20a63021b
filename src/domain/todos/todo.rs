use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

pub const TITLE_MAX_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Field values for an insert; the store fills id, timestamps and `resolved = false`.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct TodoChanges {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_title() {
        let now = Utc::now();
        let todo = Todo {
            id: 1,
            title: "Test TODO".into(),
            description: String::new(),
            due_date: None,
            resolved: false,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(todo.to_string(), "Test TODO");
    }
}
