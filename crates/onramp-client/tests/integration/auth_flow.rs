//! Integration tests for the hosted auth handle and the session provider.

use std::sync::Arc;

use onramp_client::{AuthApi, GoTrueAuth, SessionProvider};
use onramp_core::Error;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{
    ACCESS_TOKEN, ANON_KEY, SESSION_ID, TestHarness, USER_ID, anonymous_session_body,
    password_session_body,
};

#[tokio::test]
async fn test_anonymous_sign_in_posts_empty_signup() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .and(header("apikey", ANON_KEY))
        .and(header("authorization", format!("Bearer {ANON_KEY}").as_str()))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(anonymous_session_body()))
        .expect(1)
        .mount(&harness.server)
        .await;

    let provider = SessionProvider::new(Arc::new(GoTrueAuth::new(harness.client())));
    let identity = provider.ensure_identity().await.expect("sign-in should succeed");

    assert_eq!(identity.session_id.as_str(), SESSION_ID);
    assert_eq!(identity.user_id.as_ref().map(|u| u.as_str()), Some(USER_ID));
    assert!(!identity.is_authenticated);

    // Second call reuses the cached session; `expect(1)` checks on drop.
    let again = provider.ensure_identity().await.unwrap();
    assert_eq!(again, identity);
}

#[tokio::test]
async fn test_sign_in_failure_is_api_error() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({ "msg": "Anonymous sign-ins are disabled" })),
        )
        .mount(&harness.server)
        .await;

    let provider = SessionProvider::new(Arc::new(GoTrueAuth::new(harness.client())));
    let err = provider.ensure_identity().await.unwrap_err();

    assert!(matches!(
        &err,
        Error::Api { status: 422, message } if message == "Anonymous sign-ins are disabled"
    ));
    assert!(!err.is_retryable());
    assert!(provider.current_identity().await.is_none());
}

#[tokio::test]
async fn test_password_sign_in_is_authenticated() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(body_json(json!({ "email": "ops@acme.test", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(password_session_body("user-9")))
        .expect(1)
        .mount(&harness.server)
        .await;

    let auth = Arc::new(GoTrueAuth::new(harness.client()));
    auth.sign_in_with_password("ops@acme.test", "hunter2")
        .await
        .unwrap();

    let provider = SessionProvider::new(auth);
    let identity = provider.ensure_identity().await.unwrap();
    assert!(identity.is_authenticated);
    assert_eq!(identity.user_id.unwrap().as_str(), "user-9");
}

#[tokio::test]
async fn test_expired_session_is_refreshed() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(body_json(json!({ "refresh_token": "stale-refresh" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(anonymous_session_body()))
        .expect(1)
        .mount(&harness.server)
        .await;

    let auth = GoTrueAuth::new(harness.client());
    let mut stale: onramp_client::AuthSession =
        serde_json::from_value(anonymous_session_body()).unwrap();
    stale.access_token = "expired-token-expired-token-expired".to_string();
    stale.refresh_token = Some("stale-refresh".to_string());
    stale.expires_at = Some(1);
    auth.set_session(stale).await;

    let current = auth.current_session().await.unwrap().unwrap();
    assert_eq!(current.access_token, ACCESS_TOKEN);
}

#[tokio::test]
async fn test_sign_out_revokes_and_forgets() {
    let harness = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(anonymous_session_body()))
        .mount(&harness.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .and(header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&harness.server)
        .await;

    let auth = GoTrueAuth::new(harness.client());
    auth.sign_in_anonymously().await.unwrap();
    auth.sign_out().await.unwrap();

    assert!(auth.current_session().await.unwrap().is_none());
    // Nothing left to revoke.
    auth.sign_out().await.unwrap();
}

#[tokio::test]
async fn test_unreachable_backend_is_retryable_transport_error() {
    let harness = TestHarness::start().await;
    let client = harness.client();
    drop(harness);

    let auth = GoTrueAuth::new(client);
    let err = auth.sign_in_anonymously().await.unwrap_err();
    assert!(matches!(err, Error::Transport { .. }));
    assert!(err.is_retryable());
}
