use async_trait::async_trait;
use evo_api::v1::{AccessToken, Credentials, Todo, TodoCreate, TodoId, TodoToggle, TodoUpdate, User};
use reqwest::{RequestBuilder, Response, StatusCode};

use crate::{ClientError, SessionProvider, SharedSession};

/// The five calls the dashboard makes against the to-do API.
#[async_trait]
pub trait TodoClient: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Todo>, ClientError>;

    async fn create(&self, draft: &TodoCreate) -> Result<Todo, ClientError>;

    async fn update(&self, id: TodoId, patch: &TodoUpdate) -> Result<Todo, ClientError>;

    /// Sets only the completed flag.
    async fn toggle_complete(&self, id: TodoId, completed: bool) -> Result<Todo, ClientError>;

    async fn delete(&self, id: TodoId) -> Result<(), ClientError>;
}

/// [`TodoClient`] over HTTP. The bearer token is read from the session on
/// every request, so a session cleared elsewhere takes effect immediately.
#[derive(Clone)]
pub struct HttpTodoClient {
    http: reqwest::Client,
    base_url: String,
    session: SharedSession,
}

impl HttpTodoClient {
    pub fn new(base_url: &str, session: SharedSession) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn send_authorized(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let session = self.session.current().ok_or(ClientError::Unauthorized)?;
        let response = request.bearer_auth(session.access_token).send().await?;

        check_status(response).await
    }

    pub async fn sign_up(&self, credentials: &Credentials) -> Result<User, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/signup"))
            .json(credentials)
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> Result<AccessToken, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(credentials)
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }

    /// Revokes the stored token on the server. The local session is untouched.
    pub async fn sign_out(&self) -> Result<(), ClientError> {
        let request = self.http.post(self.url("/auth/logout"));
        self.send_authorized(request).await?;

        Ok(())
    }

    pub async fn me(&self) -> Result<User, ClientError> {
        let request = self.http.get(self.url("/auth/me"));
        Ok(self.send_authorized(request).await?.json().await?)
    }
}

#[async_trait]
impl TodoClient for HttpTodoClient {
    async fn get_all(&self) -> Result<Vec<Todo>, ClientError> {
        let request = self.http.get(self.url("/todos"));
        Ok(self.send_authorized(request).await?.json().await?)
    }

    async fn create(&self, draft: &TodoCreate) -> Result<Todo, ClientError> {
        let request = self.http.post(self.url("/todos")).json(draft);
        Ok(self.send_authorized(request).await?.json().await?)
    }

    async fn update(&self, id: TodoId, patch: &TodoUpdate) -> Result<Todo, ClientError> {
        let request = self.http.put(self.url(&format!("/todos/{}", id))).json(patch);
        Ok(self.send_authorized(request).await?.json().await?)
    }

    async fn toggle_complete(&self, id: TodoId, completed: bool) -> Result<Todo, ClientError> {
        let request = self
            .http
            .patch(self.url(&format!("/todos/{}/complete", id)))
            .json(&TodoToggle { completed });
        Ok(self.send_authorized(request).await?.json().await?)
    }

    async fn delete(&self, id: TodoId) -> Result<(), ClientError> {
        let request = self.http.delete(self.url(&format!("/todos/{}", id)));
        self.send_authorized(request).await?;

        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}
