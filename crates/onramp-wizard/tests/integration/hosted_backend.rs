//! Wizard run against a mock HTTP backend.

use onramp_client::{BackendClient, BackendConfig, SignupStore};
use onramp_wizard::{SignupWizard, WizardStep};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::metadata;

const ACCESS_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.payload.signature";
const SESSION_ID: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpX";
const ATTEMPT_ID: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";

fn row(step: u8, status: &str) -> Value {
    json!({
        "id": ATTEMPT_ID,
        "created_at": "2026-10-01T09:30:00Z",
        "updated_at": "2026-10-01T09:30:00Z",
        "session_id": SESSION_ID,
        "user_id": "anon-user",
        "professional_email": null,
        "company_name": "Acme",
        "website_url": null,
        "instagram_account": null,
        "selected_platforms": [],
        "platform_options": {},
        "status": status,
        "completion_step": step
    })
}

async fn mount_backend(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ACCESS_TOKEN,
            "token_type": "bearer",
            "expires_in": 3600,
            "user": { "id": "anon-user", "aud": "authenticated", "is_anonymous": true }
        })))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/signup_attempts"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([row(1, "pending")])))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/signup_attempts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row(4, "completed")])))
        .expect(1)
        .mount(server)
        .await;
}

async fn request_body(server: &MockServer, verb: &str) -> Value {
    let requests = server.received_requests().await.unwrap();
    let request = requests
        .iter()
        .find(|r| r.method.as_str() == verb && r.url.path() == "/rest/v1/signup_attempts")
        .unwrap();
    request.body_json().unwrap()
}

#[tokio::test]
async fn test_hosted_wizard_run() {
    let server = MockServer::start().await;
    mount_backend(&server).await;

    let client = BackendClient::new(&BackendConfig::new(server.uri(), "anon")).unwrap();
    let wizard = SignupWizard::new(SignupStore::hosted(client), metadata());
    assert_eq!(
        wizard.wait_for_session().await.as_ref().map(|s| s.as_str()),
        Some(SESSION_ID)
    );

    wizard.update_form(|form| form.company.name = "Acme".to_string());
    let id = wizard.create_attempt().await.unwrap();
    assert_eq!(id.to_string(), ATTEMPT_ID);

    let created = request_body(&server, "POST").await;
    assert_eq!(created[0]["professional_email"], Value::Null);
    assert_eq!(created[0]["completion_step"], json!(1));
    assert_eq!(created[0]["status"], json!("pending"));
    assert_eq!(created[0]["session_id"], json!(SESSION_ID));
    assert_eq!(created[0]["referrer"], json!("https://partner.test/"));

    wizard.advance_step(WizardStep::Payment).await.unwrap();

    let updated = request_body(&server, "PATCH").await;
    assert_eq!(updated["completion_step"], json!(4));
    assert_eq!(updated["status"], json!("completed"));
    assert_eq!(updated["company_name"], json!("Acme"));
    assert!(wizard.snapshot().is_complete());
}
