//! Signup record store.
//!
//! Creates, updates and reads signup attempts on behalf of the current
//! identity. Ownership is enforced here, on top of whatever access policy
//! the hosted store applies: every update and read is filtered by the
//! caller's session (anonymous) or user (authenticated).

use std::sync::Arc;

use onramp_core::{
    Identity, NewSignupAttempt, Result, SignupAttempt, SignupAttemptId, SignupAttemptPatch,
    StoreError,
};

use crate::auth::{AuthApi, GoTrueAuth};
use crate::client::BackendClient;
use crate::memory::{MemoryAuth, MemoryTable};
use crate::session::SessionProvider;
use crate::table::{PostgrestTable, RowFilter, SignupTable};

/// Ownership-scoped access to signup attempts.
#[derive(Clone)]
pub struct SignupStore {
    sessions: SessionProvider,
    table: Arc<dyn SignupTable>,
}

impl std::fmt::Debug for SignupStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupStore").finish_non_exhaustive()
    }
}

impl SignupStore {
    /// Creates a store over the given session provider and table.
    pub fn new(sessions: SessionProvider, table: Arc<dyn SignupTable>) -> Self {
        Self { sessions, table }
    }

    /// Store backed by the hosted auth and table services.
    pub fn hosted(client: BackendClient) -> Self {
        let auth: Arc<dyn AuthApi> = Arc::new(GoTrueAuth::new(client.clone()));
        let table = Arc::new(PostgrestTable::new(client, auth.clone()));
        Self::new(SessionProvider::new(auth), table)
    }

    /// Store backed by in-memory services; nothing leaves the process.
    pub fn in_memory() -> Self {
        Self::new(
            SessionProvider::new(Arc::new(MemoryAuth::new())),
            Arc::new(MemoryTable::new()),
        )
    }

    /// The session provider used to scope every call.
    pub fn sessions(&self) -> &SessionProvider {
        &self.sessions
    }

    /// Inserts a new attempt tagged with the current identity.
    pub async fn create(&self, attempt: NewSignupAttempt) -> Result<SignupAttempt> {
        self.insert_scoped(attempt)
            .await
            .inspect(|saved| tracing::info!(attempt_id = %saved.id, "Signup attempt saved"))
            .inspect_err(|e| tracing::error!(error = %e, "Failed to save signup attempt"))
    }

    /// Overwrites an attempt owned by the current identity.
    ///
    /// Fails with [`StoreError::NoMatchingRecord`] when the id does not exist
    /// or belongs to another session or user.
    pub async fn update(
        &self,
        id: SignupAttemptId,
        patch: SignupAttemptPatch,
    ) -> Result<SignupAttempt> {
        self.update_scoped(id, patch)
            .await
            .inspect(|updated| {
                tracing::info!(
                    attempt_id = %id,
                    completion_step = %updated.completion_step,
                    status = %updated.status,
                    "Signup attempt updated"
                )
            })
            .inspect_err(|e| {
                tracing::error!(attempt_id = %id, error = %e, "Failed to update signup attempt")
            })
    }

    /// Attempts owned by the current identity, newest first.
    pub async fn list_for_current_session(&self) -> Result<Vec<SignupAttempt>> {
        let identity = self
            .identity()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to get signup attempts"))?;
        self.table
            .select(&RowFilter::owned_by(identity.ownership()))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to get signup attempts"))
    }

    /// One attempt owned by the current identity.
    pub async fn get_by_id(&self, id: SignupAttemptId) -> Result<SignupAttempt> {
        self.select_one(id)
            .await
            .inspect_err(|e| tracing::error!(attempt_id = %id, error = %e, "Failed to get signup attempt"))
    }

    async fn insert_scoped(&self, attempt: NewSignupAttempt) -> Result<SignupAttempt> {
        let identity = self.identity().await?;
        let row = attempt.with_scope(&identity);
        tracing::debug!(session_id = %identity.session_id, "Saving signup attempt");

        let rows = self.table.insert(&row).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::EmptyInsert.into())
    }

    async fn update_scoped(
        &self,
        id: SignupAttemptId,
        patch: SignupAttemptPatch,
    ) -> Result<SignupAttempt> {
        let identity = self.identity().await?;
        let filter = RowFilter::owned_by(identity.ownership()).with_id(id);
        let patch = patch.with_scope(&identity);

        let rows = self.table.update(&patch, &filter).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::NoMatchingRecord { id: id.to_string() }.into())
    }

    async fn select_one(&self, id: SignupAttemptId) -> Result<SignupAttempt> {
        let identity = self.identity().await?;
        let filter = RowFilter::owned_by(identity.ownership()).with_id(id);

        let rows = self.table.select(&filter).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::NoMatchingRecord { id: id.to_string() }.into())
    }

    async fn identity(&self) -> Result<Identity> {
        self.sessions
            .current_identity()
            .await
            .ok_or_else(|| StoreError::NoSession.into())
    }
}
