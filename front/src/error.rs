use std::io;

/// Failure of a call to the to-do API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No stored session, or the server rejected the token.
    #[error("authorization failed")]
    Unauthorized,

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session storage: {0}")]
    Io(#[from] io::Error),

    #[error("malformed session file: {0}")]
    Format(#[from] serde_json::Error),

    #[error("no config directory to keep the session in")]
    NoConfigDir,
}

#[derive(Debug, thiserror::Error)]
pub enum SignInError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("could not store session: {0}")]
    Session(#[from] SessionError),
}
