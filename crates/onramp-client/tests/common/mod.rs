//! Common test utilities for the backend client integration tests.

use onramp_client::{BackendClient, BackendConfig, SignupStore};
use serde_json::{Value, json};
use wiremock::MockServer;

/// Public key the mock backend expects.
pub const ANON_KEY: &str = "test-anon-key";

/// Access token issued by the mock auth service.
pub const ACCESS_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.payload.signature";

/// First 32 characters of [`ACCESS_TOKEN`].
pub const SESSION_ID: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpX";

/// Id of the anonymous user the mock auth service creates.
pub const USER_ID: &str = "7a3c5a26-1b2f-4b8e-9a0d-2f6c1e7d9b10";

/// Test harness wrapping a mock backend.
pub struct TestHarness {
    /// Mock HTTP backend
    pub server: MockServer,
}

impl TestHarness {
    /// Starts a fresh mock backend.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Client pointed at the mock backend.
    pub fn client(&self) -> BackendClient {
        let config = BackendConfig::new(self.server.uri(), ANON_KEY);
        BackendClient::new(&config).expect("mock config should be valid")
    }

    /// Hosted store pointed at the mock backend.
    pub fn store(&self) -> SignupStore {
        SignupStore::hosted(self.client())
    }
}

/// Session body the auth service returns for an anonymous sign-in.
pub fn anonymous_session_body() -> Value {
    json!({
        "access_token": ACCESS_TOKEN,
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "refresh-1",
        "user": {
            "id": USER_ID,
            "aud": "authenticated",
            "is_anonymous": true
        }
    })
}

/// Session body for a password user.
pub fn password_session_body(user_id: &str) -> Value {
    json!({
        "access_token": ACCESS_TOKEN,
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "refresh-2",
        "user": {
            "id": user_id,
            "aud": "authenticated",
            "is_anonymous": false,
            "email": "ops@acme.test"
        }
    })
}

/// A stored row as the table service returns it.
pub fn attempt_row(id: &str, step: u8, status: &str) -> Value {
    json!({
        "id": id,
        "created_at": "2026-10-01T09:30:00Z",
        "updated_at": "2026-10-01T09:31:00Z",
        "session_id": SESSION_ID,
        "user_id": USER_ID,
        "professional_email": "ops@acme.test",
        "company_name": "Acme",
        "website_url": null,
        "instagram_account": null,
        "selected_platforms": ["red"],
        "platform_options": {},
        "status": status,
        "completion_step": step,
        "ip_address": null,
        "user_agent": "onramp-tests"
    })
}
