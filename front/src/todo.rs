use std::fmt;

use evo_api::v1::Todo;

/// One line of the list, plus the description underneath when there is one.
pub struct TodoRow<'a>(&'a Todo);

pub fn view(todo: &Todo) -> TodoRow<'_> {
    TodoRow(todo)
}

impl fmt::Display for TodoRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let todo = self.0;
        let check = if todo.completed { "x" } else { " " };

        write!(f, "[{}] #{} {}", check, todo.id, todo.title)?;

        if let Some(due) = todo.due_date {
            write!(f, " (due {})", due.format("%Y-%m-%d"))?;
        }

        writeln!(f)?;

        if let Some(description) = &todo.description {
            writeln!(f, "      {}", description)?;
        }

        Ok(())
    }
}
