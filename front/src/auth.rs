use evo_api::v1::{Credentials, User};
use tracing::{error, info, warn};

use crate::{ClientError, HttpTodoClient, Session, SessionProvider, SharedSession, SignInError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedInUser {
    pub email: String,
}

/// Read side of the session, plus the sign-in/out calls that change it.
#[derive(Clone)]
pub struct AuthGate {
    session: SharedSession,
}

impl AuthGate {
    pub fn new(session: SharedSession) -> Self {
        Self { session }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_present()
    }

    pub fn user(&self) -> Option<SignedInUser> {
        let session = self.session.current()?;
        Some(SignedInUser {
            email: session.email,
        })
    }

    pub fn logout(&self) {
        match self.session.clear() {
            Ok(()) => info!("signed out"),
            Err(err) => error!("Failed to clear session: {}", err),
        }
    }

    /// Revokes the token server side, then forgets it locally. The local
    /// session is cleared even when the server cannot be reached.
    pub async fn sign_out(&self, client: &HttpTodoClient) {
        match client.sign_out().await {
            Ok(()) => info!("revoked session"),
            Err(ClientError::Unauthorized) => {}
            Err(err) => warn!("Failed to revoke session: {}", err),
        }

        self.logout();
    }

    pub async fn sign_up(
        &self,
        client: &HttpTodoClient,
        credentials: &Credentials,
    ) -> Result<User, ClientError> {
        let user = client.sign_up(credentials).await?;
        info!(id = user.id, email = %user.email, "registered");

        Ok(user)
    }

    pub async fn sign_in(
        &self,
        client: &HttpTodoClient,
        credentials: &Credentials,
    ) -> Result<SignedInUser, SignInError> {
        let token = client.sign_in(credentials).await?;
        let email = credentials.email.trim().to_lowercase();

        self.session.save(&Session {
            access_token: token.access_token,
            email: email.clone(),
        })?;

        info!(email = %email, "signed in");

        Ok(SignedInUser { email })
    }
}
