//! `onramp attempts`

use anyhow::Context;
use onramp_client::SignupStore;
use onramp_core::{SignupAttempt, SignupAttemptId, platforms};

use crate::cli::AttemptsAction;
use crate::commands::open_store;
use crate::config::OnrampConfig;

/// Attempts owned by the store's identity, signing in first if needed.
pub async fn list(store: &SignupStore) -> anyhow::Result<Vec<SignupAttempt>> {
    store
        .sessions()
        .ensure_identity()
        .await
        .context("Failed to resolve a session")?;
    Ok(store.list_for_current_session().await?)
}

/// One attempt owned by the store's identity.
pub async fn show(store: &SignupStore, id: SignupAttemptId) -> anyhow::Result<SignupAttempt> {
    store
        .sessions()
        .ensure_identity()
        .await
        .context("Failed to resolve a session")?;
    Ok(store.get_by_id(id).await?)
}

/// Table of attempts, one per line.
pub fn render_list(attempts: &[SignupAttempt]) -> String {
    if attempts.is_empty() {
        return "No signup attempts for this session\n".to_string();
    }
    let mut out = String::new();
    for attempt in attempts {
        out.push_str(&format!(
            "{}  {}  {:<9}  step {}  {}\n",
            attempt.id,
            attempt.created_at.format("%Y-%m-%d %H:%M:%S"),
            attempt.status.as_str(),
            attempt.completion_step,
            attempt.fields.company_name.as_deref().unwrap_or("-"),
        ));
    }
    out
}

/// Detail view of one attempt. Payment columns are never printed.
pub fn render_attempt(attempt: &SignupAttempt) -> String {
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    let platform_list = attempt
        .fields
        .selected_platforms
        .iter()
        .map(|key| match attempt.fields.platform_options.get(key) {
            Some(option) => format!("{} ({option})", platforms::label(key)),
            None => platforms::label(key).to_string(),
        })
        .collect::<Vec<_>>();

    let mut out = String::new();
    out.push_str(&format!("id:         {}\n", attempt.id));
    out.push_str(&format!("status:     {}\n", attempt.status));
    out.push_str(&format!("step:       {}\n", attempt.completion_step));
    out.push_str(&format!("created:    {}\n", attempt.created_at.to_rfc3339()));
    out.push_str(&format!("updated:    {}\n", attempt.updated_at.to_rfc3339()));
    out.push_str(&format!("email:      {}\n", text(&attempt.fields.professional_email)));
    out.push_str(&format!("company:    {}\n", text(&attempt.fields.company_name)));
    out.push_str(&format!("website:    {}\n", text(&attempt.fields.website_url)));
    out.push_str(&format!("handle:     {}\n", text(&attempt.fields.social_handle)));
    out.push_str(&format!("platforms:  {}\n", platform_list.join(", ")));
    out.push_str(&format!("plan:       {}\n", text(&attempt.payment.selected_plan)));
    out
}

/// Entry point for `onramp attempts`.
pub async fn run(config: &OnrampConfig, action: AttemptsAction) -> anyhow::Result<()> {
    match action {
        AttemptsAction::List { backend } => {
            let store = open_store(config, &backend).await?;
            print!("{}", render_list(&list(&store).await?));
        }
        AttemptsAction::Show { id, backend } => {
            let id: SignupAttemptId = id
                .parse()
                .with_context(|| format!("'{id}' is not a signup attempt id"))?;
            let store = open_store(config, &backend).await?;
            print!("{}", render_attempt(&show(&store, id).await?));
        }
    }
    Ok(())
}
