//! In-memory backends.
//!
//! Stand-ins for the hosted auth and table services, used by tests and by
//! the CLI's offline mode. They enforce the same ownership filtering as the
//! hosted store and count calls so callers can assert on traffic.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use onramp_core::{
    Error, NewSignupAttempt, Result, SignupAttempt, SignupAttemptId, SignupAttemptPatch, UserId,
};
use uuid::Uuid;

use crate::auth::{AuthApi, AuthSession, AuthUser};
use crate::table::{RowFilter, SignupTable};

/// Mints a fresh session the way the auth service would.
fn mint_session(user_id: UserId, is_anonymous: bool) -> AuthSession {
    let now = Utc::now().timestamp();
    AuthSession {
        access_token: format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple()),
        token_type: "bearer".to_string(),
        expires_in: Some(3600),
        expires_at: Some(now + 3600),
        refresh_token: Some(Uuid::new_v4().simple().to_string()),
        user: Some(AuthUser {
            id: user_id,
            aud: "authenticated".to_string(),
            is_anonymous,
            email: None,
        }),
    }
}

/// In-memory auth service.
#[derive(Debug, Default)]
pub struct MemoryAuth {
    session: Mutex<Option<AuthSession>>,
    sign_ins: AtomicUsize,
    unreachable: bool,
}

impl MemoryAuth {
    /// No session yet; the first `ensure_identity` signs in anonymously.
    pub fn new() -> Self {
        Self::default()
    }

    /// Already signed in as a real (non-anonymous) user.
    pub fn authenticated(user_id: &str) -> Self {
        let auth = Self::new();
        auth.set_session(Some(mint_session(UserId::new(user_id), false)));
        auth
    }

    /// Every call fails with a transport error.
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    /// Replaces the current session.
    pub fn set_session(&self, session: Option<AuthSession>) {
        *self.lock() = session;
    }

    /// Starts a brand-new anonymous session, as a different browser would.
    pub fn switch_to_new_anonymous_session(&self) -> AuthSession {
        let session = mint_session(UserId::new(Uuid::new_v4().to_string()), true);
        self.set_session(Some(session.clone()));
        session
    }

    /// Number of anonymous sign-ins performed.
    pub fn sign_in_count(&self) -> usize {
        self.sign_ins.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<AuthSession>> {
        self.session
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn check_reachable(&self) -> Result<()> {
        if self.unreachable {
            return Err(Error::transport("auth service unreachable"));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthApi for MemoryAuth {
    async fn current_session(&self) -> Result<Option<AuthSession>> {
        self.check_reachable()?;
        Ok(self.lock().clone())
    }

    async fn sign_in_anonymously(&self) -> Result<AuthSession> {
        self.check_reachable()?;
        self.sign_ins.fetch_add(1, Ordering::SeqCst);
        Ok(self.switch_to_new_anonymous_session())
    }
}

/// Calls received by a [`MemoryTable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCalls {
    /// `insert` calls
    pub inserts: usize,
    /// `update` calls
    pub updates: usize,
    /// `select` calls
    pub selects: usize,
}

impl TableCalls {
    /// Total calls of any kind.
    pub fn total(&self) -> usize {
        self.inserts + self.updates + self.selects
    }
}

#[derive(Debug, Default)]
struct TableInner {
    rows: Vec<SignupAttempt>,
    calls: TableCalls,
}

/// In-memory `signup_attempts` table.
#[derive(Debug, Default)]
pub struct MemoryTable {
    inner: Mutex<TableInner>,
}

impl MemoryTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row directly, bypassing scoping (test fixtures).
    pub fn seed(&self, attempt: SignupAttempt) {
        self.lock().rows.push(attempt);
    }

    /// Snapshot of every row, in insertion order.
    pub fn rows(&self) -> Vec<SignupAttempt> {
        self.lock().rows.clone()
    }

    /// Looks up a row without any ownership check.
    pub fn get(&self, id: SignupAttemptId) -> Option<SignupAttempt> {
        self.lock().rows.iter().find(|r| r.id == id).cloned()
    }

    /// Calls received so far.
    pub fn calls(&self) -> TableCalls {
        self.lock().calls
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TableInner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl SignupTable for MemoryTable {
    async fn insert(&self, row: &NewSignupAttempt) -> Result<Vec<SignupAttempt>> {
        let attempt = SignupAttempt::inserted(SignupAttemptId::new(), Utc::now(), row.clone());
        let mut inner = self.lock();
        inner.calls.inserts += 1;
        inner.rows.push(attempt.clone());
        Ok(vec![attempt])
    }

    async fn update(
        &self,
        patch: &SignupAttemptPatch,
        filter: &RowFilter,
    ) -> Result<Vec<SignupAttempt>> {
        let now = Utc::now();
        let mut inner = self.lock();
        inner.calls.updates += 1;
        let updated: Vec<_> = inner
            .rows
            .iter_mut()
            .filter(|row| filter.matches(row))
            .map(|row| {
                row.apply(patch, now);
                row.clone()
            })
            .collect();
        Ok(updated)
    }

    async fn select(&self, filter: &RowFilter) -> Result<Vec<SignupAttempt>> {
        let mut inner = self.lock();
        inner.calls.selects += 1;
        // Newest first; rows inserted within the same tick keep reverse insertion order.
        let mut rows: Vec<_> = inner
            .rows
            .iter()
            .rev()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}
