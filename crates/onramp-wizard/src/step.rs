//! Wizard steps.

use std::fmt;
use std::str::FromStr;

use onramp_core::{CompletionStep, Error, Result};
use serde::{Deserialize, Serialize};

/// The four wizard screens, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Company details
    CompanyInfo,
    /// Platform selection
    SocialMedia,
    /// Per-platform account options
    AccountCreation,
    /// Plan and payment
    Payment,
}

impl WizardStep {
    /// All steps in display order.
    pub const ALL: [WizardStep; 4] = [
        WizardStep::CompanyInfo,
        WizardStep::SocialMedia,
        WizardStep::AccountCreation,
        WizardStep::Payment,
    ];

    /// Zero-based screen index.
    pub fn index(self) -> u8 {
        match self {
            WizardStep::CompanyInfo => 0,
            WizardStep::SocialMedia => 1,
            WizardStep::AccountCreation => 2,
            WizardStep::Payment => 3,
        }
    }

    /// Step for a zero-based screen index.
    pub fn from_index(index: u8) -> Result<Self> {
        Self::ALL.get(usize::from(index)).copied().ok_or_else(|| {
            Error::validation_field("step", format!("no wizard step at index {index}"))
        })
    }

    /// Persisted marker once this step is done: one past the screen index.
    pub fn completion_step(self) -> CompletionStep {
        match self {
            WizardStep::CompanyInfo => CompletionStep::FIRST,
            WizardStep::SocialMedia => CompletionStep::SECOND,
            WizardStep::AccountCreation => CompletionStep::THIRD,
            WizardStep::Payment => CompletionStep::FINAL,
        }
    }

    /// Returns `true` for the payment step, which completes the signup.
    pub fn is_final(self) -> bool {
        self == WizardStep::Payment
    }

    /// Next screen, if any.
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(usize::from(self.index()) + 1).copied()
    }

    /// Stable name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            WizardStep::CompanyInfo => "company_info",
            WizardStep::SocialMedia => "social_media",
            WizardStep::AccountCreation => "account_creation",
            WizardStep::Payment => "payment",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WizardStep {
    type Err = Error;

    /// Accepts a step name (`social_media`, `social-media`) or a screen index.
    fn from_str(s: &str) -> Result<Self> {
        if let Ok(index) = s.parse::<u8>() {
            return Self::from_index(index);
        }
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|step| step.as_str() == normalized)
            .ok_or_else(|| Error::validation_field("step", format!("unknown wizard step '{s}'")))
    }
}
