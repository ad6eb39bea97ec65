mod auth;
mod todos;

use axum::{
    routing::{get, patch, post},
    Router,
};

pub use auth::CurrentUser;

use crate::SharedState;

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/todos", get(todos::list_todos).post(todos::create_todo))
        .route(
            "/todos/:id",
            get(todos::get_todo)
                .put(todos::update_todo)
                .delete(todos::delete_todo),
        )
        .route("/todos/:id/complete", patch(todos::set_todo_completed))
}
