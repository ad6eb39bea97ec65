pub mod sidebar;
pub mod todo_input;

use std::fmt;

use evo_api::v1::Todo;

use crate::{todo, TodoListState};

pub use sidebar::Sidebar;

pub const SIGN_IN_FIRST: &str = "Signin First then you'll able to see the Dashboard";
pub const EMPTY_STATE: &str = "No tasks yet. Add one to get started!";

/// What the dashboard shows right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DashboardView<'a> {
    Loading,
    Redirecting,
    Ready {
        notice: Option<String>,
        /// The task list panel was opened from the menu.
        view_mode: bool,
        show_add_form: bool,
        todos: &'a [Todo],
    },
}

/// The loading screen wins over the auth check, which is made again on every
/// render so an expired session never shows protected content.
pub fn view(state: &TodoListState, authenticated: bool) -> DashboardView<'_> {
    if state.view().loading {
        return DashboardView::Loading;
    }

    if !authenticated {
        return DashboardView::Redirecting;
    }

    DashboardView::Ready {
        notice: state.notice(),
        view_mode: state.view().view_mode,
        show_add_form: state.view().show_add_form,
        todos: state.todos(),
    }
}

impl fmt::Display for DashboardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (notice, view_mode, show_add_form, todos) = match self {
            DashboardView::Loading => return writeln!(f, "Loading..."),
            DashboardView::Redirecting => return writeln!(f, "Redirecting to sign in..."),
            DashboardView::Ready {
                notice,
                view_mode,
                show_add_form,
                todos,
            } => (notice, *view_mode, *show_add_form, *todos),
        };

        writeln!(f, "Evolution of Todo")?;
        writeln!(f, "Task Manager")?;
        writeln!(f)?;

        if let Some(notice) = notice {
            writeln!(f, "* {}", notice)?;
            writeln!(f)?;
        }

        if show_add_form {
            writeln!(f, "Add New Task: title, description (optional), due date")?;
            writeln!(f)?;
        }

        if view_mode {
            writeln!(f, "Your Tasks ({})", todos.len())?;
        }

        if todos.is_empty() {
            return writeln!(f, "{}", EMPTY_STATE);
        }

        for item in todos {
            write!(f, "{}", todo::view(item))?;
        }

        Ok(())
    }
}
