//! Integration tests for `attempts` against a mock hosted backend.

use onramp_cli::OnrampConfig;
use onramp_cli::cli::BackendArgs;
use onramp_cli::commands::{attempts, open_store};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_ID: &str = "user-42";

fn config_for(server: &MockServer) -> OnrampConfig {
    let mut config = OnrampConfig::default();
    config.backend.url = server.uri();
    config.backend.anon_key = "anon".to_string();
    config
}

fn credentials() -> BackendArgs {
    BackendArgs {
        offline: false,
        user: Some("ops@acme.test".to_string()),
        password: Some("hunter2".to_string()),
    }
}

#[tokio::test]
async fn test_signed_in_listing_filters_by_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "0123456789abcdef0123456789abcdef-rest-of-token",
            "token_type": "bearer",
            "expires_in": 3600,
            "user": { "id": USER_ID, "aud": "authenticated", "is_anonymous": false }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/signup_attempts"))
        .and(query_param("user_id", format!("eq.{USER_ID}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "0f8fad5b-d9cb-469f-a165-70867728950e",
            "created_at": "2026-10-01T09:30:00Z",
            "updated_at": "2026-10-01T09:45:00Z",
            "session_id": "0123456789abcdef0123456789abcdef",
            "user_id": USER_ID,
            "company_name": "Acme",
            "selected_platforms": ["red"],
            "platform_options": {},
            "status": "completed",
            "completion_step": 4
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let store = open_store(&config_for(&server), &credentials()).await.unwrap();
    let listed = attempts::list(&store).await.unwrap();

    assert_eq!(listed.len(), 1);
    let out = attempts::render_list(&listed);
    assert!(out.contains("completed"));
    assert!(out.contains("step 4"));
}

#[tokio::test]
async fn test_bad_credentials_fail_to_open_store() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let err = open_store(&config_for(&server), &credentials()).await.unwrap_err();

    assert!(err.to_string().contains("Failed to sign in as ops@acme.test"));
    assert!(format!("{err:#}").contains("Invalid login credentials"));
}
