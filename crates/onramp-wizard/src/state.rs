//! Observable wizard state.

use onramp_core::{CompletionStep, SessionId, SignupAttemptId};

use crate::form::SignupForm;

/// Snapshot of a wizard, published on every change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    /// The attempt being tracked, once created
    pub signup_attempt_id: Option<SignupAttemptId>,

    /// Session resolved at startup, if any
    pub session_id: Option<SessionId>,

    /// Current form input
    pub form: SignupForm,

    /// A persistence call is in flight
    pub is_loading: bool,

    /// Message from the last failed persistence call
    pub error: Option<String>,

    /// Highest step persisted for the current attempt
    pub completed_step: Option<CompletionStep>,
}

impl WizardState {
    /// Returns `true` once an attempt exists.
    pub fn has_attempt(&self) -> bool {
        self.signup_attempt_id.is_some()
    }

    /// Returns `true` once the final step has been persisted.
    pub fn is_complete(&self) -> bool {
        self.completed_step.is_some_and(|s| s.is_final())
    }
}
