//! Core types for signup attempts.

mod attempt;
mod identity;
mod ids;
mod proptests;
mod status;

pub use attempt::{
    NewSignupAttempt, PaymentDetails, RequestMetadata, SIGNUP_ATTEMPTS_TABLE, SignupAttempt,
    SignupAttemptPatch, SignupFields, optional_text,
};
pub use identity::{Identity, Ownership};
pub use ids::{SESSION_ID_LEN, SessionId, SignupAttemptId, UserId};
pub use status::{CompletionStep, SignupStatus};
