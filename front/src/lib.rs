//! Client core for Evolution of Todo.
//!
//! [`Dashboard`] ties together an [`AuthGate`] over a persisted
//! [`SessionProvider`], a [`TodoClient`] talking to the REST API and the
//! [`TodoListState`] the views are rendered from. Everything runs on a single
//! task; the only deferred work is the expiry of the success notice.

pub mod api;
pub mod auth;
pub mod dashboard;
mod error;
pub mod notice;
pub mod session;
pub mod state;
pub mod todo;
pub mod ui;

pub use api::{HttpTodoClient, TodoClient};
pub use auth::{AuthGate, SignedInUser};
pub use dashboard::{ActionOutcome, Dashboard};
pub use error::{ClientError, SessionError, SignInError};
pub use session::{FileSession, MemorySession, Session, SessionProvider, SharedSession};
pub use state::{TodoListState, ViewState};
pub use ui::todo_input::{FormError, TodoForm};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:7890";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    SignIn,
    SignUp,
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::SignIn => "/signin",
            Route::SignUp => "/signup",
            Route::Dashboard => "/dashboard",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Evolution of Todo",
            Route::SignIn => "Sign In",
            Route::SignUp => "Sign Up",
            Route::Dashboard => "Dashboard",
        }
    }
}
