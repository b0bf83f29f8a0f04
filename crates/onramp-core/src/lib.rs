#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Onramp Core Library
//!
//! Data model, identities and static tables for the signup flow. This crate
//! performs no I/O; the client crate talks to the backend.

pub mod error;
pub mod platforms;
pub mod routes;
pub mod types;

// Re-exports for convenience
pub use error::{Error, Result, StoreError};
pub use types::{
    CompletionStep, Identity, NewSignupAttempt, Ownership, PaymentDetails, RequestMetadata,
    SessionId, SignupAttempt, SignupAttemptId, SignupAttemptPatch, SignupFields, SignupStatus,
    UserId,
};
