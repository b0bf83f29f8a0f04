//! Auth service access.
//!
//! [`AuthApi`] is the seam to the hosted identity service. [`GoTrueAuth`]
//! talks to a GoTrue-compatible HTTP API and caches the resulting session in
//! the handle; [`crate::memory::MemoryAuth`] is the in-process stand-in.

use std::fmt;

use async_trait::async_trait;
use chrono::Utc;
use onramp_core::{Identity, Result, SessionId, UserId};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::RwLock;

use crate::client::BackendClient;

/// Seconds before the recorded expiry at which a session counts as expired.
const EXPIRY_LEEWAY_SECS: i64 = 10;

/// Audience value the auth service uses for anonymous users.
const ANONYMOUS_AUDIENCE: &str = "anonymous";

/// User attached to an auth session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// User id
    pub id: UserId,

    /// Token audience
    #[serde(default)]
    pub aud: String,

    /// Set for users created by an anonymous sign-in
    #[serde(default)]
    pub is_anonymous: bool,

    /// Email, for password users
    #[serde(default)]
    pub email: Option<String>,
}

impl AuthUser {
    /// Returns `true` for a real (non-anonymous) account.
    pub fn is_authenticated(&self) -> bool {
        !self.is_anonymous && self.aud != ANONYMOUS_AUDIENCE
    }
}

/// A session issued by the auth service.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token for the table API
    pub access_token: String,

    /// Token type, normally `bearer`
    #[serde(default)]
    pub token_type: String,

    /// Lifetime in seconds from issue
    #[serde(default)]
    pub expires_in: Option<i64>,

    /// Expiry as a unix timestamp
    #[serde(default)]
    pub expires_at: Option<i64>,

    /// Token used to obtain a fresh session
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Signed-in user
    #[serde(default)]
    pub user: Option<AuthUser>,
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .finish()
    }
}

impl AuthSession {
    /// Fills in `expires_at` from `expires_in` when the service only sent the latter.
    pub fn stamped(mut self, now: i64) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = self.expires_in.map(|secs| now + secs);
        }
        self
    }

    /// Returns `true` once the session is at or near its expiry.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at
            .is_some_and(|at| at - EXPIRY_LEEWAY_SECS <= now)
    }

    /// Session identifier derived from the access token.
    pub fn session_id(&self) -> Option<SessionId> {
        SessionId::from_access_token(&self.access_token)
    }

    /// The identity this session represents, if it has a usable token.
    pub fn identity(&self) -> Option<Identity> {
        let session_id = self.session_id()?;
        Some(Identity {
            session_id,
            user_id: self.user.as_ref().map(|u| u.id.clone()),
            is_authenticated: self.user.as_ref().is_some_and(AuthUser::is_authenticated),
        })
    }
}

/// Access to the hosted identity service.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Returns the current session, or `None` if there is none.
    async fn current_session(&self) -> Result<Option<AuthSession>>;

    /// Creates an anonymous user and session.
    async fn sign_in_anonymously(&self) -> Result<AuthSession>;
}

/// GoTrue-compatible auth API over HTTP.
pub struct GoTrueAuth {
    client: BackendClient,
    session: RwLock<Option<AuthSession>>,
}

impl GoTrueAuth {
    /// Create an auth handle with no session.
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            session: RwLock::new(None),
        }
    }

    /// Adopt a session obtained elsewhere (e.g. restored from storage).
    pub async fn set_session(&self, session: AuthSession) {
        let session = session.stamped(Utc::now().timestamp());
        *self.session.write().await = Some(session);
    }

    /// Sign in with email and password.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthSession> {
        let request = self
            .client
            .request(Method::POST, "auth/v1/token", None)
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }));

        let session = self.exchange(request).await?;
        tracing::info!(email = %email, "Signed in with password");
        Ok(session)
    }

    /// Exchange a refresh token for a new session.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthSession> {
        let request = self
            .client
            .request(Method::POST, "auth/v1/token", None)
            .query(&[("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": refresh_token }));

        let session = self.exchange(request).await?;
        tracing::debug!("Session refreshed");
        Ok(session)
    }

    /// Revoke the current session and forget it locally.
    pub async fn sign_out(&self) -> Result<()> {
        let Some(session) = self.session.write().await.take() else {
            return Ok(());
        };
        let request =
            self.client
                .request(Method::POST, "auth/v1/logout", Some(&session.access_token));
        self.client.send(request).await?;
        tracing::info!("Signed out");
        Ok(())
    }

    async fn exchange(&self, request: reqwest::RequestBuilder) -> Result<AuthSession> {
        let session: AuthSession = self.client.send_json(request).await?;
        let session = session.stamped(Utc::now().timestamp());
        *self.session.write().await = Some(session.clone());
        Ok(session)
    }
}

#[async_trait]
impl AuthApi for GoTrueAuth {
    async fn current_session(&self) -> Result<Option<AuthSession>> {
        let cached = self.session.read().await.clone();
        let Some(session) = cached else {
            return Ok(None);
        };
        if !session.is_expired(Utc::now().timestamp()) {
            return Ok(Some(session));
        }

        match session.refresh_token.as_deref() {
            Some(refresh_token) => self.refresh(refresh_token).await.map(Some),
            None => {
                tracing::debug!("Cached session expired without refresh token");
                *self.session.write().await = None;
                Ok(None)
            }
        }
    }

    async fn sign_in_anonymously(&self) -> Result<AuthSession> {
        let request = self
            .client
            .request(Method::POST, "auth/v1/signup", None)
            .json(&json!({}));

        let session = self.exchange(request).await?;
        tracing::info!(
            user_id = ?session.user.as_ref().map(|u| u.id.as_str()),
            "Anonymous sign in successful"
        );
        Ok(session)
    }
}
