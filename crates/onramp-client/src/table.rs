//! Access to the `signup_attempts` table.
//!
//! [`SignupTable`] is the seam to the hosted table service. Every read and
//! update goes through a [`RowFilter`], which always carries an ownership
//! predicate. [`PostgrestTable`] speaks the PostgREST dialect over HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use onramp_core::types::SIGNUP_ATTEMPTS_TABLE;
use onramp_core::{NewSignupAttempt, Ownership, Result, SignupAttempt, SignupAttemptId, SignupAttemptPatch};
use reqwest::Method;

use crate::auth::AuthApi;
use crate::client::BackendClient;

/// Row selection: an optional primary key plus a mandatory ownership predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    /// Primary key to match
    pub id: Option<SignupAttemptId>,

    /// Ownership predicate to match
    pub owner: Ownership,
}

impl RowFilter {
    /// All rows owned by `owner`.
    pub fn owned_by(owner: Ownership) -> Self {
        Self { id: None, owner }
    }

    /// Narrows the filter to one primary key.
    pub fn with_id(mut self, id: SignupAttemptId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns `true` if `attempt` passes the filter.
    pub fn matches(&self, attempt: &SignupAttempt) -> bool {
        self.id.is_none_or(|id| id == attempt.id)
            && self
                .owner
                .matches(attempt.session_id.as_ref(), attempt.user_id.as_ref())
    }

    /// PostgREST query pairs (`column=eq.value`).
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(id) = self.id {
            pairs.push(("id", format!("eq.{id}")));
        }
        pairs.push((self.owner.column(), format!("eq.{}", self.owner.value())));
        pairs
    }
}

/// Storage operations on signup attempts.
#[async_trait]
pub trait SignupTable: Send + Sync {
    /// Inserts one row and returns what the store wrote.
    async fn insert(&self, row: &NewSignupAttempt) -> Result<Vec<SignupAttempt>>;

    /// Updates every row matching `filter` and returns the updated rows.
    async fn update(&self, patch: &SignupAttemptPatch, filter: &RowFilter)
    -> Result<Vec<SignupAttempt>>;

    /// Returns rows matching `filter`, newest first.
    async fn select(&self, filter: &RowFilter) -> Result<Vec<SignupAttempt>>;
}

/// `signup_attempts` over a PostgREST endpoint.
pub struct PostgrestTable {
    client: BackendClient,
    auth: Arc<dyn AuthApi>,
    path: String,
}

impl PostgrestTable {
    /// Creates a table handle; requests carry the current session's token.
    pub fn new(client: BackendClient, auth: Arc<dyn AuthApi>) -> Self {
        Self {
            client,
            auth,
            path: format!("rest/v1/{SIGNUP_ATTEMPTS_TABLE}"),
        }
    }

    async fn request(&self, method: Method) -> reqwest::RequestBuilder {
        let token = match self.auth.current_session().await {
            Ok(session) => session.map(|s| s.access_token),
            Err(e) => {
                tracing::warn!(error = %e, "No session token, using public key");
                None
            }
        };
        self.client
            .request(method, &self.path, token.as_deref())
            .header("Prefer", "return=representation")
    }
}

#[async_trait]
impl SignupTable for PostgrestTable {
    async fn insert(&self, row: &NewSignupAttempt) -> Result<Vec<SignupAttempt>> {
        let request = self
            .request(Method::POST)
            .await
            .query(&[("select", "*")])
            .json(&[row]);
        self.client.send_json(request).await
    }

    async fn update(
        &self,
        patch: &SignupAttemptPatch,
        filter: &RowFilter,
    ) -> Result<Vec<SignupAttempt>> {
        let request = self
            .request(Method::PATCH)
            .await
            .query(&filter.query_pairs())
            .query(&[("select", "*")])
            .json(patch);
        self.client.send_json(request).await
    }

    async fn select(&self, filter: &RowFilter) -> Result<Vec<SignupAttempt>> {
        let request = self
            .request(Method::GET)
            .await
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .query(&filter.query_pairs());
        self.client.send_json(request).await
    }
}
