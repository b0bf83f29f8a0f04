//! Backend client handle.

use onramp_core::{Error, Result};
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;

use crate::config::BackendConfig;

/// Handle to the hosted backend.
///
/// Created once at startup and shared by the auth API and the table API.
/// Cheap to clone: the underlying `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

/// Error payload shapes returned by the auth and table services.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.message
            .or(self.msg)
            .or(self.error_description)
            .or(self.error)
    }
}

impl BackendClient {
    /// Create a new client from a validated config.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("onramp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::transport_with_source("failed to build HTTP client", e))?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        })
    }

    /// Base URL of the backend, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Public API key.
    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    /// Absolute URL for a backend path such as `rest/v1/signup_attempts`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request carrying the `apikey` header and a bearer token.
    ///
    /// Without a user token the public key is sent as the bearer.
    pub fn request(&self, method: Method, path: &str, bearer: Option<&str>) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer.unwrap_or(self.anon_key.as_str()))
    }

    /// Send a request and turn error statuses into [`Error::Api`].
    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::transport_with_source("request to backend failed", e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.canonical_reason().unwrap_or("unknown error").to_string()
                } else {
                    body
                }
            });

        tracing::debug!(status = status.as_u16(), message = %message, "Backend returned error");
        Err(Error::api(status.as_u16(), message))
    }

    /// Send a request and decode its JSON body.
    pub async fn send_json<T>(&self, request: RequestBuilder) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.send(request).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::transport_with_source("failed to read backend response", e))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
