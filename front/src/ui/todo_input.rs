use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use evo_api::v1::{TodoCreate, TodoUpdate};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("invalid due date {0:?}, expected YYYY-MM-DD")]
    InvalidDueDate(String),
}

/// Input fields of the "Add New Task" form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoForm {
    pub title: String,
    pub description: String,
    /// Calendar date as typed, `YYYY-MM-DD`.
    pub due_date: String,
}

impl TodoForm {
    /// Validates the fields into a draft and clears them. On error the fields
    /// are kept as they are.
    pub fn submit(&mut self) -> Result<TodoCreate, FormError> {
        let title = required_title(&self.title)?;
        let due_date = parse_due_date(&self.due_date)?;

        let draft = TodoCreate {
            title,
            description: optional_text(&self.description),
            due_date,
        };

        *self = Self::default();

        Ok(draft)
    }
}

/// Builds an update from edited fields; `None` leaves a field as it is.
pub fn update_patch(
    title: Option<&str>,
    description: Option<&str>,
    due_date: Option<&str>,
) -> Result<TodoUpdate, FormError> {
    Ok(TodoUpdate {
        title: title.map(required_title).transpose()?,
        description: description.map(|text| text.trim().to_string()),
        due_date: match due_date {
            Some(input) => parse_due_date(input)?,
            None => None,
        },
        completed: None,
    })
}

/// A calendar date is pinned to midnight UTC.
pub fn parse_due_date(input: &str) -> Result<Option<DateTime<Utc>>, FormError> {
    let input = input.trim();

    if input.is_empty() {
        return Ok(None);
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| FormError::InvalidDueDate(input.to_string()))?;

    Ok(Some(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))))
}

fn required_title(title: &str) -> Result<String, FormError> {
    let title = title.trim();

    if title.is_empty() {
        return Err(FormError::EmptyTitle);
    }

    Ok(title.to_string())
}

fn optional_text(text: &str) -> Option<String> {
    Some(text.trim())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
