//! `onramp signup`: a scripted wizard run.

use anyhow::Context;
use onramp_core::platforms;
use onramp_core::{CompletionStep, SessionId, SignupAttemptId, SignupStatus};
use onramp_wizard::{SignupForm, SignupWizard, WizardStep};

use crate::cli::SignupArgs;
use crate::commands::open_store;
use crate::config::OnrampConfig;

/// What a wizard run persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupSummary {
    /// Created attempt
    pub attempt_id: SignupAttemptId,
    /// Session the attempt belongs to
    pub session_id: Option<SessionId>,
    /// Stored marker after the last step
    pub completion_step: CompletionStep,
    /// Stored status after the last step
    pub status: SignupStatus,
}

/// Copies the command-line answers into the form.
pub fn fill_form(form: &mut SignupForm, args: &SignupArgs) {
    form.company.professional_email = args.email.clone();
    form.company.name = args.company.clone();
    form.company.website = args.website.clone();
    form.company.social_handle = args.handle.clone();

    for platform in &args.platforms {
        if !platforms::is_known(&platform.key) {
            tracing::warn!(platform = %platform.key, "Unknown platform, keeping it anyway");
        }
        match &platform.option {
            Some(option) => form.set_platform_option(platform.key.clone(), option.clone()),
            None => form.select_platform(platform.key.clone()),
        }
    }
}

/// Creates the attempt and persists every step up to `args.through`.
pub async fn run_wizard(wizard: &SignupWizard, args: &SignupArgs) -> anyhow::Result<SignupSummary> {
    let session_id = wizard.wait_for_session().await;
    if session_id.is_none() {
        tracing::warn!("No session available, saving will fail");
    }

    wizard.update_form(|form| fill_form(form, args));
    let attempt_id = wizard
        .create_attempt()
        .await
        .context("Failed to create signup attempt")?;
    tracing::info!(attempt_id = %attempt_id, "Company info saved");

    let mut completion_step = CompletionStep::FIRST;
    let mut status = SignupStatus::Pending;
    for step in WizardStep::ALL
        .into_iter()
        .skip(1)
        .take_while(|step| *step <= args.through)
    {
        let saved = wizard
            .advance_step(step)
            .await
            .with_context(|| format!("Failed to save step {step}"))?;
        if let Some(attempt) = saved {
            tracing::info!(%step, completion_step = %attempt.completion_step, "Step saved");
            completion_step = attempt.completion_step;
            status = attempt.status;
        }
    }

    Ok(SignupSummary {
        attempt_id,
        session_id,
        completion_step,
        status,
    })
}

/// Entry point for `onramp signup`.
pub async fn run(config: &OnrampConfig, args: &SignupArgs) -> anyhow::Result<()> {
    let store = open_store(config, &args.backend).await?;
    let wizard = SignupWizard::new(store, config.request_metadata());
    let summary = run_wizard(&wizard, args).await?;

    println!("Signup attempt {}", summary.attempt_id);
    if let Some(session_id) = &summary.session_id {
        println!("  session:  {session_id}");
    }
    println!("  step:     {}/{}", summary.completion_step, CompletionStep::FINAL);
    println!("  status:   {}", summary.status);
    Ok(())
}
