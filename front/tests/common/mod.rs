#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use evo_api::v1::{Todo, TodoCreate, TodoId, TodoUpdate};
use evo_front::{
    AuthGate, ClientError, MemorySession, Session, SessionProvider, SharedSession, TodoClient,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    GetAll,
    Create(TodoCreate),
    Update(TodoId, TodoUpdate),
    Toggle(TodoId, bool),
    Delete(TodoId),
}

#[derive(Clone, Copy, Debug)]
pub enum Failure {
    Unauthorized,
    Server,
}

#[derive(Default)]
struct Inner {
    todos: Vec<Todo>,
    next_id: TodoId,
    calls: Vec<Call>,
    failure: Option<Failure>,
    expire_on_fetch: Option<SharedSession>,
}

/// In-memory stand-in for the API that records every call it receives.
#[derive(Clone, Default)]
pub struct RecordingClient {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let next_id = todos.iter().map(|todo| todo.id).max().unwrap_or(0);
        let client = Self::new();
        {
            let mut inner = client.inner();
            inner.todos = todos;
            inner.next_id = next_id;
        }
        client
    }

    pub fn fail_with(&self, failure: Option<Failure>) {
        self.inner().failure = failure;
    }

    /// Clears `session` while the next `get_all` is in flight.
    pub fn expire_during_fetch(&self, session: SharedSession) {
        self.inner().expire_on_fetch = Some(session);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner().calls.clone()
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    fn record(&self, call: Call) -> Result<MutexGuard<'_, Inner>, ClientError> {
        let mut inner = self.inner();
        inner.calls.push(call);

        match inner.failure {
            Some(Failure::Unauthorized) => Err(ClientError::Unauthorized),
            Some(Failure::Server) => Err(ClientError::Status {
                status: 500,
                body: String::from("internal error"),
            }),
            None => Ok(inner),
        }
    }
}

fn not_found() -> ClientError {
    ClientError::Status {
        status: 404,
        body: String::from(r#"{"detail":"Todo not found"}"#),
    }
}

#[async_trait]
impl TodoClient for RecordingClient {
    async fn get_all(&self) -> Result<Vec<Todo>, ClientError> {
        let mut inner = self.record(Call::GetAll)?;

        if let Some(session) = inner.expire_on_fetch.take() {
            session.clear().unwrap();
        }

        Ok(inner.todos.clone())
    }

    async fn create(&self, draft: &TodoCreate) -> Result<Todo, ClientError> {
        let mut inner = self.record(Call::Create(draft.clone()))?;
        inner.next_id += 1;

        let todo = Todo {
            id: inner.next_id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            due_date: draft.due_date,
            completed: false,
        };
        inner.todos.push(todo.clone());

        Ok(todo)
    }

    async fn update(&self, id: TodoId, patch: &TodoUpdate) -> Result<Todo, ClientError> {
        let mut inner = self.record(Call::Update(id, patch.clone()))?;
        let todo = (inner.todos.iter_mut())
            .find(|todo| todo.id == id)
            .ok_or_else(not_found)?;

        if let Some(title) = &patch.title {
            todo.title = title.clone();
        }
        if let Some(description) = &patch.description {
            todo.description = Some(description.clone());
        }
        if let Some(due_date) = patch.due_date {
            todo.due_date = Some(due_date);
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }

        Ok(todo.clone())
    }

    async fn toggle_complete(&self, id: TodoId, completed: bool) -> Result<Todo, ClientError> {
        let mut inner = self.record(Call::Toggle(id, completed))?;
        let todo = (inner.todos.iter_mut())
            .find(|todo| todo.id == id)
            .ok_or_else(not_found)?;
        todo.completed = completed;

        Ok(todo.clone())
    }

    async fn delete(&self, id: TodoId) -> Result<(), ClientError> {
        let mut inner = self.record(Call::Delete(id))?;
        let before = inner.todos.len();
        inner.todos.retain(|todo| todo.id != id);

        if inner.todos.len() == before {
            return Err(not_found());
        }

        Ok(())
    }
}

pub fn todo(id: TodoId, title: &str) -> Todo {
    Todo {
        id,
        title: title.to_string(),
        description: None,
        due_date: None,
        completed: false,
    }
}

pub fn signed_in() -> (AuthGate, Arc<MemorySession>) {
    let session = Arc::new(MemorySession::signed_in(Session {
        access_token: String::from("token"),
        email: String::from("ada@example.com"),
    }));

    (AuthGate::new(session.clone()), session)
}

pub fn signed_out() -> AuthGate {
    AuthGate::new(Arc::new(MemorySession::new()))
}
