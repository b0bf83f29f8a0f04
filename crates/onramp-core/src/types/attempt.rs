//! The persisted signup attempt and its create/update payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::types::{CompletionStep, Identity, SessionId, SignupAttemptId, SignupStatus, UserId};

/// Name of the backing table.
pub const SIGNUP_ATTEMPTS_TABLE: &str = "signup_attempts";

/// Normalizes a free-text form value: blank input means "not yet provided".
///
/// # Examples
///
/// ```
/// use onramp_core::types::optional_text;
///
/// assert_eq!(optional_text(""), None);
/// assert_eq!(optional_text("   "), None);
/// assert_eq!(optional_text(" acme "), Some("acme".to_string()));
/// ```
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// The trackable snapshot sent on every create and update.
///
/// Missing values serialize as `null`, never as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupFields {
    /// Professional email address
    pub professional_email: Option<String>,

    /// Company name
    pub company_name: Option<String>,

    /// Company website
    pub website_url: Option<String>,

    /// Social handle of the company account
    #[serde(rename = "instagram_account")]
    pub social_handle: Option<String>,

    /// Platform keys in selection order
    #[serde(default)]
    pub selected_platforms: Vec<String>,

    /// Platform key → chosen account-creation option
    #[serde(default)]
    pub platform_options: BTreeMap<String, String>,
}

/// Client request metadata recorded on creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMetadata {
    /// Client user agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Referring page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
}

/// Insert payload for a new signup attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSignupAttempt {
    /// Form snapshot
    #[serde(flatten)]
    pub fields: SignupFields,

    /// Initial status
    pub status: SignupStatus,

    /// Initial progress marker
    pub completion_step: CompletionStep,

    /// Request metadata
    #[serde(flatten)]
    pub metadata: RequestMetadata,

    /// Owning session, attached by the store
    pub session_id: Option<SessionId>,

    /// Owning user, attached by the store
    pub user_id: Option<UserId>,
}

impl NewSignupAttempt {
    /// Creates the payload recorded when the first wizard step is persisted.
    pub fn first_step(fields: SignupFields, metadata: RequestMetadata) -> Self {
        Self {
            fields,
            status: SignupStatus::Pending,
            completion_step: CompletionStep::FIRST,
            metadata,
            session_id: None,
            user_id: None,
        }
    }

    /// Tags the payload with the caller's identity.
    pub fn with_scope(mut self, identity: &Identity) -> Self {
        self.session_id = Some(identity.session_id.clone());
        self.user_id = identity.user_id.clone();
        self
    }
}

/// Update payload overwriting the trackable snapshot of an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupAttemptPatch {
    /// Form snapshot
    #[serde(flatten)]
    pub fields: SignupFields,

    /// Progress marker
    pub completion_step: CompletionStep,

    /// New status, if it changes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SignupStatus>,

    /// Caller session, attached by the store
    pub session_id: Option<SessionId>,

    /// Caller user, attached by the store
    pub user_id: Option<UserId>,
}

impl SignupAttemptPatch {
    /// Creates a patch for the given step; the final step completes the attempt.
    pub fn for_step(fields: SignupFields, completion_step: CompletionStep) -> Self {
        Self {
            fields,
            completion_step,
            status: completion_step
                .is_final()
                .then_some(SignupStatus::Completed),
            session_id: None,
            user_id: None,
        }
    }

    /// Tags the payload with the caller's identity.
    pub fn with_scope(mut self, identity: &Identity) -> Self {
        self.session_id = Some(identity.session_id.clone());
        self.user_id = identity.user_id.clone();
        self
    }
}

/// Plan and payment columns. Present in the schema, never written by the wizard.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// Selected plan
    #[serde(default)]
    pub selected_plan: Option<String>,
    /// Card number
    #[serde(default)]
    pub card_number: Option<String>,
    /// Card expiry
    #[serde(default)]
    pub expiry_date: Option<String>,
    /// Card verification value
    #[serde(default)]
    pub cvv: Option<String>,
    /// Cardholder name
    #[serde(default)]
    pub cardholder_name: Option<String>,
    /// Billing address
    #[serde(default)]
    pub billing_address: Option<String>,
}

impl fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &Option<String>) -> &'static str {
            if value.is_some() { "<redacted>" } else { "None" }
        }
        f.debug_struct("PaymentDetails")
            .field("selected_plan", &self.selected_plan)
            .field("card_number", &redact(&self.card_number))
            .field("expiry_date", &redact(&self.expiry_date))
            .field("cvv", &redact(&self.cvv))
            .field("cardholder_name", &redact(&self.cardholder_name))
            .field("billing_address", &redact(&self.billing_address))
            .finish()
    }
}

/// A row of the `signup_attempts` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupAttempt {
    /// Store-assigned identifier
    pub id: SignupAttemptId,

    /// Insert time
    pub created_at: DateTime<Utc>,

    /// Last update time
    pub updated_at: DateTime<Utc>,

    /// Owning session
    #[serde(default)]
    pub session_id: Option<SessionId>,

    /// Owning user
    #[serde(default)]
    pub user_id: Option<UserId>,

    /// Form snapshot
    #[serde(flatten)]
    pub fields: SignupFields,

    /// Plan and payment columns
    #[serde(flatten)]
    pub payment: PaymentDetails,

    /// Lifecycle status
    #[serde(default)]
    pub status: SignupStatus,

    /// Progress marker
    #[serde(default)]
    pub completion_step: CompletionStep,

    /// Client address, filled in server-side when at all
    #[serde(default)]
    pub ip_address: Option<String>,

    /// Request metadata
    #[serde(flatten)]
    pub metadata: RequestMetadata,
}

impl SignupAttempt {
    /// Materializes an inserted row the way the store would.
    pub fn inserted(id: SignupAttemptId, now: DateTime<Utc>, new: NewSignupAttempt) -> Self {
        Self {
            id,
            created_at: now,
            updated_at: now,
            session_id: new.session_id,
            user_id: new.user_id,
            fields: new.fields,
            payment: PaymentDetails::default(),
            status: new.status,
            completion_step: new.completion_step,
            ip_address: None,
            metadata: new.metadata,
        }
    }

    /// Applies an update payload the way the store would.
    pub fn apply(&mut self, patch: &SignupAttemptPatch, now: DateTime<Utc>) {
        self.fields = patch.fields.clone();
        self.completion_step = patch.completion_step;
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.session_id = patch.session_id.clone();
        self.user_id = patch.user_id.clone();
        self.updated_at = now;
    }
}
