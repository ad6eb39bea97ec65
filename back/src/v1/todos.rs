use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use evo_api::v1::{Todo, TodoCreate, TodoId, TodoToggle, TodoUpdate};
use tracing::info;

use super::CurrentUser;
use crate::{ApiError, SharedState, Store, TodoRecord, ValidJson};

pub async fn list_todos(
    State(state): State<SharedState>,
    CurrentUser(owner): CurrentUser,
) -> Json<Vec<Todo>> {
    let store = state.store.lock().await;
    let todos = (store.todos.values())
        .filter(|record| record.owner == owner)
        .map(|record| record.todo.clone())
        .collect();

    Json(todos)
}

pub async fn create_todo(
    State(state): State<SharedState>,
    CurrentUser(owner): CurrentUser,
    ValidJson(draft): ValidJson<TodoCreate>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let title = required_title(&draft.title)?;

    let mut store = state.store.lock().await;
    let todo = Todo {
        id: store.allocate_todo_id(),
        title,
        description: optional_text(draft.description),
        due_date: draft.due_date,
        completed: false,
    };
    store.todos.insert(
        todo.id,
        TodoRecord {
            owner,
            todo: todo.clone(),
        },
    );

    info!(
        id = %todo.id,
        owner,
        title = %todo.title,
        "created todo"
    );

    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn get_todo(
    State(state): State<SharedState>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<TodoId>,
) -> Result<Json<Todo>, ApiError> {
    let mut store = state.store.lock().await;
    let todo = owned_todo(&mut store, owner, id)?;

    Ok(Json(todo.clone()))
}

pub async fn update_todo(
    State(state): State<SharedState>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<TodoId>,
    ValidJson(patch): ValidJson<TodoUpdate>,
) -> Result<Json<Todo>, ApiError> {
    let title = patch.title.as_deref().map(required_title).transpose()?;

    let mut store = state.store.lock().await;
    let todo = owned_todo(&mut store, owner, id)?;

    if let Some(title) = title {
        todo.title = title;
    }

    if let Some(description) = patch.description {
        todo.description = optional_text(Some(description));
    }

    if let Some(due_date) = patch.due_date {
        todo.due_date = Some(due_date);
    }

    if let Some(completed) = patch.completed {
        todo.completed = completed;
    }

    info!(
        id = %todo.id,
        title = ?todo.title,
        "updated todo"
    );

    Ok(Json(todo.clone()))
}

pub async fn set_todo_completed(
    State(state): State<SharedState>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<TodoId>,
    ValidJson(toggle): ValidJson<TodoToggle>,
) -> Result<Json<Todo>, ApiError> {
    let mut store = state.store.lock().await;
    let todo = owned_todo(&mut store, owner, id)?;
    todo.completed = toggle.completed;

    info!(
        id = %todo.id,
        completed = todo.completed,
        "updated todo status"
    );

    Ok(Json(todo.clone()))
}

pub async fn delete_todo(
    State(state): State<SharedState>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<TodoId>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.lock().await;
    owned_todo(&mut store, owner, id)?;
    store.todos.remove(&id);

    info!(id, "deleted todo");

    Ok(StatusCode::NO_CONTENT)
}

/// Items of other users are reported as missing.
fn owned_todo(store: &mut Store, owner: i64, id: TodoId) -> Result<&mut Todo, ApiError> {
    match store.todos.get_mut(&id) {
        Some(record) if record.owner == owner => Ok(&mut record.todo),
        _ => Err(ApiError::NotFound),
    }
}

fn required_title(title: &str) -> Result<String, ApiError> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ApiError::Validation(String::from("Title must not be empty")));
    }

    Ok(title.to_owned())
}

fn optional_text(text: Option<String>) -> Option<String> {
    text.map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
