//! Explicit authentication session.
//!
//! The session is created by the caller and handed to the client, so token
//! state has a single owner with a defined lifecycle.

use tokio::sync::RwLock;
use tracing::debug;

use crate::error::ClientError;

#[derive(Debug, Clone)]
struct Credentials {
    access_token: String,
    refresh_token: Option<String>,
}

/// Holds the bearer credentials of the signed-in user.
#[derive(Debug, Default)]
pub struct Session {
    credentials: RwLock<Option<Credentials>>,
}

impl Session {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the session with a fresh token pair.
    pub async fn init(&self, access_token: impl Into<String>, refresh_token: Option<String>) {
        *self.credentials.write().await = Some(Credentials {
            access_token: access_token.into(),
            refresh_token,
        });
        debug!("Session initialized");
    }

    /// Replaces the access token, keeping the refresh token.
    pub async fn refresh(&self, access_token: impl Into<String>) -> Result<(), ClientError> {
        let mut guard = self.credentials.write().await;
        let credentials = guard.as_mut().ok_or(ClientError::NoSession)?;
        credentials.access_token = access_token.into();
        debug!("Session refreshed");
        Ok(())
    }

    /// Ends the session.
    pub async fn teardown(&self) {
        *self.credentials.write().await = None;
        debug!("Session torn down");
    }

    /// Current access token, if signed in.
    pub async fn bearer(&self) -> Option<String> {
        self.credentials
            .read()
            .await
            .as_ref()
            .map(|c| c.access_token.clone())
    }

    /// Current refresh token, if any.
    pub async fn refresh_token(&self) -> Option<String> {
        self.credentials
            .read()
            .await
            .as_ref()
            .and_then(|c| c.refresh_token.clone())
    }

    /// Returns true while the session holds credentials.
    pub async fn is_active(&self) -> bool {
        self.credentials.read().await.is_some()
    }
}
