use chrono::NaiveDate;

use crate::domain::todos::todo::TITLE_MAX_CHARS;

/// Raw form fields as posted by the to-do page. `None` means the field was absent.
#[derive(Debug, Clone, Default)]
pub struct TodoFormDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum TodoFormError {
    #[error("Invalid due date: {0}")]
    InvalidDueDate(String),
    #[error("Title must be at most {TITLE_MAX_CHARS} characters")]
    TitleTooLong,
    #[error("failed to store todo")]
    Internal(#[source] anyhow::Error),
}

/// Empty or missing means no due date.
pub fn parse_due_date(raw: Option<&str>) -> Result<Option<NaiveDate>, TodoFormError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| TodoFormError::InvalidDueDate(s.to_string())),
    }
}

pub fn check_title(title: &str) -> Result<(), TodoFormError> {
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(TodoFormError::TitleTooLong);
    }
    Ok(())
}
