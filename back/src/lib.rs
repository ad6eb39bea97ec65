//! Reference REST server for the to-do client.
//!
//! Everything lives in memory behind `tokio` mutexes. The store can be
//! snapshotted to a RON file and restored on start; bearer sessions are never
//! written to disk, so a restart signs every client out.

mod error;
pub mod v1;

use std::{
    collections::{BTreeMap, HashMap},
    fs, io,
    path::PathBuf,
    sync::Arc,
};

use axum::{routing::get, Json, Router};
use evo_api::v1::{Greeting, Health, Todo, TodoId};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::Mutex};
use tower_http::cors::CorsLayer;

pub use error::{ApiError, ValidJson};

pub type SharedState = Arc<AppState>;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub salt: String,
    pub password_hash: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TodoRecord {
    pub owner: i64,
    pub todo: Todo,
}

#[derive(Default, Debug, Serialize, Deserialize)]
pub struct Store {
    pub next_user_id: i64,
    pub next_todo_id: TodoId,
    pub users: BTreeMap<i64, UserRecord>,
    pub todos: BTreeMap<TodoId, TodoRecord>,
}

impl Store {
    pub fn allocate_user_id(&mut self) -> i64 {
        self.next_user_id += 1;
        self.next_user_id
    }

    pub fn allocate_todo_id(&mut self) -> TodoId {
        self.next_todo_id += 1;
        self.next_todo_id
    }

    pub fn user_by_email(&self, email: &str) -> Option<&UserRecord> {
        self.users.values().find(|user| user.email == email)
    }
}

#[derive(Default, Debug)]
pub struct AppState {
    data_file: Option<PathBuf>,
    pub store: Mutex<Store>,
    /// Bearer token to user id.
    pub sessions: Mutex<HashMap<String, i64>>,
}

impl AppState {
    /// State that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn load(path: impl Into<PathBuf>) -> eyre::Result<Self> {
        let path = path.into();

        let file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Self::persistent(path, Store::default()));
            }
            Err(err) => eyre::bail!(err),
        };
        let data: DataOwned = ron::de::from_reader(file)?;

        match data {
            DataOwned::V1 { store } => Ok(Self::persistent(path, store)),
        }
    }

    fn persistent(path: PathBuf, store: Store) -> Self {
        Self {
            data_file: Some(path),
            store: Mutex::new(store),
            sessions: Mutex::default(),
        }
    }

    pub async fn store(&self) -> eyre::Result<()> {
        let Some(path) = &self.data_file else {
            return Ok(());
        };

        let store = self.store.lock().await;
        let data = DataBorrowed::V1 { store: &store };

        let file = fs::File::create(path)?;
        let mut ron = ron::Serializer::new(file, Some(Default::default()))?;
        data.serialize(&mut ron)?;

        tracing::debug!(
            path = %path.display(),
            todos = store.todos.len(),
            "stored snapshot"
        );

        Ok(())
    }
}

#[derive(Serialize)]
enum DataBorrowed<'a> {
    V1 { store: &'a Store },
}

#[derive(Deserialize)]
enum DataOwned {
    V1 { store: Store },
}

pub fn app(state: SharedState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api", v1::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: SharedState) -> io::Result<()> {
    axum::serve(listener, app(state)).await
}

async fn root() -> Json<Greeting> {
    tracing::info!("root endpoint accessed");

    Json(Greeting {
        message: String::from("Evolution of Todo API is running!"),
    })
}

async fn health() -> Json<Health> {
    Json(Health {
        status: String::from("healthy"),
    })
}
