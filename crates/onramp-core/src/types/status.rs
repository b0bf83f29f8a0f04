//! Signup status and completion-step types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Lifecycle status of a signup attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignupStatus {
    /// Attempt created, wizard not finished.
    #[default]
    Pending,

    /// The final wizard step was reached.
    Completed,

    /// The attempt failed downstream.
    Failed,

    /// The user abandoned the attempt.
    Cancelled,
}

impl SignupStatus {
    /// Returns `true` if no further progress is expected.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SignupStatus::Pending)
    }

    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignupStatus::Pending => "pending",
            SignupStatus::Completed => "completed",
            SignupStatus::Failed => "failed",
            SignupStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SignupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SignupStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(SignupStatus::Pending),
            "completed" => Ok(SignupStatus::Completed),
            "failed" => Ok(SignupStatus::Failed),
            "cancelled" => Ok(SignupStatus::Cancelled),
            other => Err(Error::validation_field(
                "status",
                format!("unknown signup status '{other}'"),
            )),
        }
    }
}

/// Persisted wizard progress marker, always within `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CompletionStep(u8);

impl CompletionStep {
    /// Company information captured; the step recorded on creation.
    pub const FIRST: CompletionStep = CompletionStep(1);

    /// Platforms selected.
    pub const SECOND: CompletionStep = CompletionStep(2);

    /// Account options chosen.
    pub const THIRD: CompletionStep = CompletionStep(3);

    /// Payment step reached; the attempt is complete.
    pub const FINAL: CompletionStep = CompletionStep(4);

    /// Creates a completion step, rejecting values outside `1..=4`.
    pub fn new(step: u8) -> Result<Self> {
        if (Self::FIRST.0..=Self::FINAL.0).contains(&step) {
            Ok(Self(step))
        } else {
            Err(Error::validation_field(
                "completion_step",
                format!(
                    "must be between {} and {}, got {step}",
                    Self::FIRST.0,
                    Self::FINAL.0
                ),
            ))
        }
    }

    /// Returns the raw step number.
    pub fn get(&self) -> u8 {
        self.0
    }

    /// Returns `true` for the last step.
    pub fn is_final(&self) -> bool {
        *self == Self::FINAL
    }
}

impl Default for CompletionStep {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u8> for CompletionStep {
    type Error = Error;

    fn try_from(step: u8) -> Result<Self> {
        Self::new(step)
    }
}

impl From<CompletionStep> for u8 {
    fn from(step: CompletionStep) -> Self {
        step.0
    }
}

impl fmt::Display for CompletionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
