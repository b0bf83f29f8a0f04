//! The signup wizard state machine.

use std::fmt;
use std::sync::Arc;

use onramp_client::SignupStore;
use onramp_core::{
    Error, NewSignupAttempt, RequestMetadata, Result, SessionId, SignupAttempt, SignupAttemptId,
    SignupAttemptPatch,
};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

use crate::form::SignupForm;
use crate::state::WizardState;
use crate::step::WizardStep;

/// Progress of the startup identity lookup.
enum SessionInit {
    /// No runtime was available at construction
    NotStarted,
    /// Running in the background
    Pending(JoinHandle<()>),
    /// Finished, successfully or not
    Done,
}

/// Clears `is_loading` when dropped, including when the call is cancelled.
struct LoadingGuard<'a> {
    tx: &'a watch::Sender<WizardState>,
}

impl<'a> LoadingGuard<'a> {
    fn start(tx: &'a watch::Sender<WizardState>) -> Self {
        tx.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });
        Self { tx }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.tx.send_if_modified(|s| std::mem::replace(&mut s.is_loading, false));
    }
}

/// Handle to one wizard run.
///
/// Cheap to clone (Arc internals). Persistence calls on the same wizard are
/// serialized, so a double submit creates at most one attempt. State changes
/// are broadcast to subscribers via a watch channel.
#[derive(Clone)]
pub struct SignupWizard {
    inner: Arc<WizardInner>,
}

struct WizardInner {
    store: SignupStore,
    metadata: RequestMetadata,
    tx: watch::Sender<WizardState>,
    persist: Mutex<()>,
    session_init: Mutex<SessionInit>,
}

impl SignupWizard {
    /// Creates a wizard and starts resolving the session in the background.
    ///
    /// A failed lookup is logged and never blocks the form; the first
    /// persistence call then fails with a store error instead.
    pub fn new(store: SignupStore, metadata: RequestMetadata) -> Self {
        let (tx, _rx) = watch::channel(WizardState::default());
        let inner = Arc::new(WizardInner {
            store,
            metadata,
            tx,
            persist: Mutex::new(()),
            session_init: Mutex::new(SessionInit::NotStarted),
        });

        let init = match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let task_inner = Arc::clone(&inner);
                SessionInit::Pending(handle.spawn(async move { task_inner.init_session().await }))
            }
            Err(_) => {
                tracing::debug!("No async runtime, deferring session initialization");
                SessionInit::NotStarted
            }
        };
        if let Ok(mut slot) = inner.session_init.try_lock() {
            *slot = init;
        }

        Self { inner }
    }

    /// Waits for the startup session lookup and returns the session id.
    pub async fn wait_for_session(&self) -> Option<SessionId> {
        let mut init = self.inner.session_init.lock().await;
        match std::mem::replace(&mut *init, SessionInit::Done) {
            SessionInit::Pending(handle) => {
                if let Err(e) = handle.await {
                    tracing::error!(error = %e, "Session initialization task failed");
                }
            }
            SessionInit::NotStarted => self.inner.init_session().await,
            SessionInit::Done => {}
        }
        self.inner.tx.borrow().session_id.clone()
    }

    /// Current state.
    pub fn snapshot(&self) -> WizardState {
        self.inner.tx.borrow().clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<WizardState> {
        self.inner.tx.subscribe()
    }

    /// Current form input.
    pub fn form(&self) -> SignupForm {
        self.inner.tx.borrow().form.clone()
    }

    /// Edits the form in place.
    pub fn update_form<F>(&self, edit: F)
    where
        F: FnOnce(&mut SignupForm),
    {
        self.inner.tx.send_modify(|s| edit(&mut s.form));
    }

    /// The store this wizard persists to.
    pub fn store(&self) -> &SignupStore {
        &self.inner.store
    }

    /// Creates the signup attempt from the first step's fields.
    ///
    /// Waits for the startup session lookup first. Idempotent: once an
    /// attempt exists its id is returned without touching the store.
    pub async fn create_attempt(&self) -> Result<SignupAttemptId> {
        let _persist = self.inner.persist.lock().await;
        self.wait_for_session().await;
        if let Some(id) = self.snapshot().signup_attempt_id {
            return Ok(id);
        }

        let _loading = LoadingGuard::start(&self.inner.tx);
        let payload = NewSignupAttempt::first_step(self.form().fields(), self.inner.metadata.clone());
        let attempt = self
            .inner
            .store
            .create(payload)
            .await
            .inspect_err(|e| self.record_error(e))?;

        self.inner.tx.send_modify(|s| {
            s.signup_attempt_id = Some(attempt.id);
            s.completed_step = Some(attempt.completion_step);
        });
        tracing::info!(attempt_id = %attempt.id, "Signup attempt created");
        Ok(attempt.id)
    }

    /// Persists the full snapshot after finishing `step`.
    ///
    /// Does nothing (no store call, no state change) before an attempt
    /// exists. The completion marker never moves backwards, and finishing
    /// the payment step completes the attempt.
    pub async fn advance_step(&self, step: WizardStep) -> Result<Option<SignupAttempt>> {
        let _persist = self.inner.persist.lock().await;
        self.wait_for_session().await;
        let state = self.snapshot();
        let Some(id) = state.signup_attempt_id else {
            tracing::debug!(%step, "No signup attempt yet, skipping update");
            return Ok(None);
        };

        let completion_step = state
            .completed_step
            .map_or(step.completion_step(), |previous| {
                previous.max(step.completion_step())
            });

        let _loading = LoadingGuard::start(&self.inner.tx);
        let patch = SignupAttemptPatch::for_step(state.form.fields(), completion_step);
        let attempt = self
            .inner
            .store
            .update(id, patch)
            .await
            .inspect_err(|e| self.record_error(e))?;

        self.inner.tx.send_modify(|s| {
            if s.signup_attempt_id == Some(id) {
                s.completed_step = Some(attempt.completion_step);
            }
        });
        Ok(Some(attempt))
    }

    /// Persists the payment step and returns the attempt id.
    pub async fn complete_signup(&self) -> Result<Option<SignupAttemptId>> {
        self.advance_step(WizardStep::Payment).await?;
        Ok(self.snapshot().signup_attempt_id)
    }

    /// Clears the form, the attempt and the error to start a new signup.
    pub fn reset(&self) {
        self.inner.tx.send_modify(|s| {
            s.form = SignupForm::default();
            s.signup_attempt_id = None;
            s.completed_step = None;
            s.error = None;
        });
        tracing::debug!("Wizard reset");
    }

    fn record_error(&self, error: &Error) {
        let message = error.to_string();
        self.inner.tx.send_modify(|s| s.error = Some(message));
    }
}

impl WizardInner {
    async fn init_session(&self) {
        match self.store.sessions().ensure_identity().await {
            Ok(identity) => {
                tracing::debug!(session_id = %identity.session_id, "Wizard session initialized");
                self.tx
                    .send_modify(|s| s.session_id = Some(identity.session_id));
            }
            Err(e) => tracing::error!(error = %e, "Failed to initialize session"),
        }
    }
}

impl fmt::Debug for SignupWizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupWizard")
            .field("state", &self.snapshot())
            .finish()
    }
}
