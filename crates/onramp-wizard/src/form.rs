//! Wizard form model.
//!
//! Raw user input, exactly as typed. Blank text is only turned into "not
//! provided" when a snapshot is taken for the store.

use std::collections::BTreeMap;

use onramp_core::SignupFields;
use onramp_core::types::optional_text;
use serde::{Deserialize, Serialize};

/// Company details collected on the first step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    /// Professional email address
    pub professional_email: String,
    /// Company name
    pub name: String,
    /// Company website
    pub website: String,
    /// Social handle of the company account
    pub social_handle: String,
}

/// How an account should be set up on one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformOption {
    /// Platform key
    pub platform: String,
    /// Chosen option, e.g. `create` or `existing`
    pub option: String,
}

/// Everything the wizard collects.
///
/// Platform options only ever exist for selected platforms; the mutators
/// below keep the two lists consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    /// Company info step
    pub company: CompanyInfo,
    /// Selected platform keys, in selection order
    selected_platforms: Vec<String>,
    /// Per-platform account options, in the order they were set
    platform_options: Vec<PlatformOption>,
}

impl SignupForm {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected platform keys, in selection order.
    pub fn selected_platforms(&self) -> &[String] {
        &self.selected_platforms
    }

    /// Account options set so far.
    pub fn platform_options(&self) -> &[PlatformOption] {
        &self.platform_options
    }

    /// Returns `true` if the platform is selected.
    pub fn is_selected(&self, platform: &str) -> bool {
        self.selected_platforms.iter().any(|p| p == platform)
    }

    /// Selects a platform. Selecting twice has no effect.
    pub fn select_platform(&mut self, platform: impl Into<String>) {
        let platform = platform.into();
        if !self.is_selected(&platform) {
            self.selected_platforms.push(platform);
        }
    }

    /// Deselects a platform and drops its account option.
    pub fn deselect_platform(&mut self, platform: &str) {
        self.selected_platforms.retain(|p| p != platform);
        self.platform_options.retain(|o| o.platform != platform);
    }

    /// Flips the selection; returns `true` if the platform is now selected.
    pub fn toggle_platform(&mut self, platform: &str) -> bool {
        if self.is_selected(platform) {
            self.deselect_platform(platform);
            false
        } else {
            self.select_platform(platform);
            true
        }
    }

    /// Sets the account option for a platform, selecting it if needed.
    pub fn set_platform_option(&mut self, platform: impl Into<String>, option: impl Into<String>) {
        let platform = platform.into();
        let option = option.into();
        self.select_platform(platform.clone());

        match self.platform_options.iter_mut().find(|o| o.platform == platform) {
            Some(existing) => existing.option = option,
            None => self.platform_options.push(PlatformOption { platform, option }),
        }
    }

    /// The account option set for a platform.
    pub fn platform_option(&self, platform: &str) -> Option<&str> {
        self.platform_options
            .iter()
            .find(|o| o.platform == platform)
            .map(|o| o.option.as_str())
    }

    /// Snapshot of the trackable fields; blank text becomes `None`.
    pub fn fields(&self) -> SignupFields {
        SignupFields {
            professional_email: optional_text(&self.company.professional_email),
            company_name: optional_text(&self.company.name),
            website_url: optional_text(&self.company.website),
            social_handle: optional_text(&self.company.social_handle),
            selected_platforms: self.selected_platforms.clone(),
            platform_options: self
                .platform_options
                .iter()
                .map(|o| (o.platform.clone(), o.option.clone()))
                .collect::<BTreeMap<_, _>>(),
        }
    }
}
