//! Integration tests for full wizard runs over in-memory backends.

use std::sync::Arc;

use onramp_client::memory::MemoryAuth;
use onramp_client::{SessionProvider, SignupStore};
use onramp_core::{CompletionStep, Error, SignupStatus, StoreError};
use onramp_wizard::{SignupWizard, WizardStep};

use crate::common::{StalledTable, TestHarness, metadata};

#[tokio::test]
async fn test_advance_before_create_is_noop() {
    let harness = TestHarness::new().await;
    harness.fill_company();
    let before = harness.wizard.snapshot();

    for step in WizardStep::ALL {
        let result = harness.wizard.advance_step(step).await.unwrap();
        assert!(result.is_none(), "step {step} should not persist anything");
    }

    assert_eq!(harness.table.calls().total(), 0);
    assert_eq!(harness.wizard.snapshot(), before);
}

#[tokio::test]
async fn test_create_twice_inserts_once() {
    let harness = TestHarness::new().await;

    let first = harness.wizard.create_attempt().await.unwrap();
    let second = harness.wizard.create_attempt().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(harness.table.calls().inserts, 1);
}

#[tokio::test]
async fn test_concurrent_create_inserts_once() {
    let harness = TestHarness::new().await;
    let other = harness.wizard.clone();

    let (a, b) = tokio::join!(harness.wizard.create_attempt(), other.create_attempt());

    assert_eq!(a.unwrap(), b.unwrap());
    assert_eq!(harness.table.calls().inserts, 1);
    assert_eq!(harness.table.rows().len(), 1);
}

#[tokio::test]
async fn test_payment_step_completes_attempt() {
    let harness = TestHarness::new().await;
    let id = harness.wizard.create_attempt().await.unwrap();

    let step = WizardStep::from_index(3).unwrap();
    let updated = harness.wizard.advance_step(step).await.unwrap().unwrap();

    assert_eq!(updated.status, SignupStatus::Completed);
    assert_eq!(updated.completion_step, CompletionStep::FINAL);
    let stored = harness.table.get(id).unwrap();
    assert_eq!(stored.status, SignupStatus::Completed);
    assert_eq!(stored.completion_step.get(), 4);
    assert!(harness.wizard.snapshot().is_complete());
}

#[tokio::test]
async fn test_update_from_other_session_fails() {
    let harness = TestHarness::new().await;
    let id = harness.wizard.create_attempt().await.unwrap();

    harness.auth.switch_to_new_anonymous_session();
    let err = harness
        .wizard
        .advance_step(WizardStep::SocialMedia)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Store(StoreError::NoMatchingRecord { .. })));
    assert_eq!(harness.wizard.snapshot().error, Some(err.to_string()));
    assert_eq!(harness.table.get(id).unwrap().completion_step, CompletionStep::FIRST);
}

#[tokio::test]
async fn test_reset_then_create_starts_new_attempt() {
    let harness = TestHarness::new().await;
    harness.fill_company();
    let first = harness.wizard.create_attempt().await.unwrap();

    harness.wizard.reset();
    let state = harness.wizard.snapshot();
    assert!(state.signup_attempt_id.is_none());
    assert!(state.form.company.name.is_empty());
    assert!(state.session_id.is_some());

    let second = harness.wizard.create_attempt().await.unwrap();
    assert_ne!(first, second);
    assert_eq!(harness.table.calls().inserts, 2);
}

#[tokio::test]
async fn test_empty_email_is_stored_as_null() {
    let harness = TestHarness::new().await;
    harness.wizard.update_form(|form| form.company.name = "Acme".to_string());

    let id = harness.wizard.create_attempt().await.unwrap();

    let stored = harness.table.get(id).unwrap();
    assert_eq!(stored.fields.professional_email, None);
    assert_eq!(stored.fields.company_name.as_deref(), Some("Acme"));
}

#[tokio::test]
async fn test_full_run_persists_every_step() {
    let harness = TestHarness::new().await;
    let session_id = harness.wizard.snapshot().session_id;
    harness.fill_company();
    let id = harness.wizard.create_attempt().await.unwrap();

    harness.wizard.update_form(|form| {
        form.select_platform("red");
        form.select_platform("wechat");
    });
    harness.wizard.advance_step(WizardStep::SocialMedia).await.unwrap();
    assert_eq!(harness.table.get(id).unwrap().completion_step, CompletionStep::SECOND);

    harness.wizard.update_form(|form| {
        form.set_platform_option("red", "create");
        form.set_platform_option("wechat", "existing");
    });
    harness.wizard.advance_step(WizardStep::AccountCreation).await.unwrap();

    assert_eq!(harness.wizard.complete_signup().await.unwrap(), Some(id));

    let stored = harness.table.get(id).unwrap();
    assert_eq!(stored.status, SignupStatus::Completed);
    assert_eq!(stored.session_id, session_id);
    assert_eq!(stored.fields.selected_platforms, vec!["red", "wechat"]);
    assert_eq!(stored.fields.platform_options["wechat"], "existing");
    assert_eq!(stored.metadata, metadata());
    assert_eq!(harness.table.calls().updates, 3);
}

#[tokio::test]
async fn test_subscribers_see_attempt_id() {
    let harness = TestHarness::new().await;
    let mut rx = harness.wizard.subscribe();

    let id = harness.wizard.create_attempt().await.unwrap();

    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().signup_attempt_id, Some(id));
}

#[tokio::test]
async fn test_cancelled_create_clears_loading() {
    let store = SignupStore::new(
        SessionProvider::new(Arc::new(MemoryAuth::new())),
        Arc::new(StalledTable),
    );
    let wizard = SignupWizard::new(store, metadata());
    wizard.wait_for_session().await;
    let mut rx = wizard.subscribe();

    let task = tokio::spawn({
        let wizard = wizard.clone();
        async move { wizard.create_attempt().await }
    });
    rx.wait_for(|s| s.is_loading).await.unwrap();

    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());

    let state = wizard.snapshot();
    assert!(!state.is_loading);
    assert!(state.signup_attempt_id.is_none());
}

#[tokio::test]
async fn test_create_right_after_construction_waits_for_session() {
    let harness = TestHarness::starting();
    harness.fill_company();

    let id = harness.wizard.create_attempt().await.unwrap();

    let state = harness.wizard.snapshot();
    assert_eq!(state.signup_attempt_id, Some(id));
    assert!(state.session_id.is_some());
    assert_eq!(state.error, None);
    assert_eq!(harness.table.get(id).unwrap().session_id, state.session_id);
}

#[tokio::test]
async fn test_advance_queued_behind_startup_persists() {
    let harness = TestHarness::starting();
    harness.fill_company();
    let other = harness.wizard.clone();

    let (created, advanced) = tokio::join!(
        harness.wizard.create_attempt(),
        other.advance_step(WizardStep::SocialMedia)
    );

    let id = created.unwrap();
    let updated = advanced.unwrap().unwrap();
    assert_eq!(updated.id, id);
    assert_eq!(updated.completion_step, CompletionStep::SECOND);
    assert_eq!(harness.table.calls().inserts, 1);
    assert_eq!(harness.table.calls().updates, 1);
    assert_eq!(harness.wizard.snapshot().error, None);
}

#[tokio::test]
async fn test_advance_without_attempt_during_startup_is_noop() {
    let harness = TestHarness::starting();

    let result = harness.wizard.advance_step(WizardStep::Payment).await.unwrap();

    assert!(result.is_none());
    assert_eq!(harness.table.calls().total(), 0);
    assert!(harness.wizard.snapshot().session_id.is_some());
}
