#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod form;
pub mod state;
pub mod step;
pub mod wizard;

pub use form::{CompanyInfo, PlatformOption, SignupForm};
pub use state::WizardState;
pub use step::WizardStep;
pub use wizard::SignupWizard;
