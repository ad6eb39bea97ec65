use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    Json,
};
use evo_api::v1::{AccessToken, Credentials, User};
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{ApiError, SharedState, UserRecord, ValidJson};

/// The user owning the bearer token of the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentUser(pub i64);

#[async_trait]
impl FromRequestParts<SharedState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(ApiError::Unauthorized)?;

        let sessions = state.sessions.lock().await;
        sessions
            .get(token)
            .copied()
            .map(CurrentUser)
            .ok_or(ApiError::Unauthorized)
    }
}

pub async fn signup(
    State(state): State<SharedState>,
    ValidJson(credentials): ValidJson<Credentials>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let email = normalize_email(&credentials.email);

    if !email.contains('@') {
        return Err(ApiError::Validation(String::from("A valid email address is required")));
    }

    if credentials.password.is_empty() {
        return Err(ApiError::Validation(String::from("Password must not be empty")));
    }

    let mut store = state.store.lock().await;

    if store.user_by_email(&email).is_some() {
        return Err(ApiError::Conflict(String::from("Email already registered")));
    }

    let id = store.allocate_user_id();
    let salt = Uuid::new_v4().simple().to_string();
    let password_hash = hash_password(&salt, &credentials.password);

    store.users.insert(
        id,
        UserRecord {
            id,
            email: email.clone(),
            salt,
            password_hash,
        },
    );

    info!(id, email = %email, "registered user");

    Ok((StatusCode::CREATED, Json(User { id, email })))
}

pub async fn login(
    State(state): State<SharedState>,
    ValidJson(credentials): ValidJson<Credentials>,
) -> Result<Json<AccessToken>, ApiError> {
    let email = normalize_email(&credentials.email);

    let id = {
        let store = state.store.lock().await;
        let user = store.user_by_email(&email).ok_or_else(|| {
            warn!(email = %email, "login for unknown email");
            ApiError::InvalidCredentials
        })?;

        if hash_password(&user.salt, &credentials.password) != user.password_hash {
            warn!(email = %email, "login with wrong password");
            return Err(ApiError::InvalidCredentials);
        }

        user.id
    };

    let token = Uuid::new_v4().simple().to_string();

    // one live session per user
    let mut sessions = state.sessions.lock().await;
    sessions.retain(|_, user| *user != id);
    sessions.insert(token.clone(), id);

    info!(id, "issued session");

    Ok(Json(AccessToken::bearer(token)))
}

pub async fn logout(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError::Unauthorized)?;
    let id = (state.sessions.lock().await)
        .remove(token)
        .ok_or(ApiError::Unauthorized)?;

    info!(id, "revoked session");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn me(
    State(state): State<SharedState>,
    CurrentUser(id): CurrentUser,
) -> Result<Json<User>, ApiError> {
    let store = state.store.lock().await;
    let user = store.users.get(&id).ok_or(ApiError::Unauthorized)?;

    Ok(Json(User {
        id: user.id,
        email: user.email.clone(),
    }))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
