//! Session provider.

use std::sync::Arc;

use onramp_core::{Identity, Result, StoreError};

use crate::auth::AuthApi;

/// Resolves the caller's identity, signing in anonymously when needed.
#[derive(Clone)]
pub struct SessionProvider {
    auth: Arc<dyn AuthApi>,
}

impl SessionProvider {
    /// Creates a provider over the given auth API.
    pub fn new(auth: Arc<dyn AuthApi>) -> Self {
        Self { auth }
    }

    /// The underlying auth API.
    pub fn auth(&self) -> &Arc<dyn AuthApi> {
        &self.auth
    }

    /// Returns the current identity.
    ///
    /// `None` when there is no session or when the auth call failed; the
    /// failure is logged, never returned.
    pub async fn current_identity(&self) -> Option<Identity> {
        match self.auth.current_session().await {
            Ok(session) => session.as_ref().and_then(|s| s.identity()),
            Err(e) => {
                tracing::error!(error = %e, "Error getting session");
                None
            }
        }
    }

    /// Returns the current identity, signing in anonymously if there is none.
    ///
    /// Anonymous identities are never authenticated.
    pub async fn ensure_identity(&self) -> Result<Identity> {
        if let Some(identity) = self.current_identity().await {
            return Ok(identity);
        }

        tracing::info!("No existing session found, signing in anonymously");
        let session = self
            .auth
            .sign_in_anonymously()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to sign in anonymously"))?;

        let mut identity = session.identity().ok_or(StoreError::NoSession)?;
        identity.is_authenticated = false;

        tracing::debug!(session_id = %identity.session_id, "Session initialized");
        Ok(identity)
    }
}
