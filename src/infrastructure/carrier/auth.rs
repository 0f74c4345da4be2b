//! # Carrier Credentials
//!
//! OAuth2 client-credentials token acquisition.
//!
//! Token acquisition never fails outright. A [`CredentialState`] goes in and
//! a new one comes out, holding either a bearer token or the categorized
//! reason there is none.
//!
//! ```text
//! POST {base}/oauth2/v3/token
//! Content-Type: application/x-www-form-urlencoded
//!
//! grant_type=client_credentials&client_id=...&client_secret=...
//! ```

use crate::infrastructure::carrier::error::{AuthFailureKind, CarrierError};
use crate::infrastructure::carrier::http_client::HttpClient;
use crate::infrastructure::carrier::traits::TokenSource;
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;

/// Path of the token endpoint relative to the API base URL.
pub const TOKEN_PATH: &str = "/oauth2/v3/token";

/// A categorized token acquisition failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFailure {
    kind: AuthFailureKind,
    message: String,
}

impl AuthFailure {
    /// Creates a failure.
    #[must_use]
    pub fn new(kind: AuthFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the failure category.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> AuthFailureKind {
        self.kind
    }

    /// Returns the detail message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl From<CarrierError> for AuthFailure {
    fn from(error: CarrierError) -> Self {
        let kind = error.auth_failure_kind().unwrap_or(AuthFailureKind::Other);
        Self::new(kind, error.to_string())
    }
}

/// Carrier credentials and the outcome of the last token request.
///
/// Built once per engine and never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialState {
    consumer_key: String,
    consumer_secret: String,
    access_token: Option<String>,
    last_error: Option<AuthFailure>,
}

impl CredentialState {
    /// Creates a state with no token.
    #[must_use]
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: None,
            last_error: None,
        }
    }

    /// Creates a state with no credentials.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self::new("", "")
    }

    /// Returns true if both key and secret are non-blank.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.consumer_key.trim().is_empty() && !self.consumer_secret.trim().is_empty()
    }

    /// Returns the consumer key.
    #[inline]
    #[must_use]
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// Returns the bearer token, if one was acquired.
    #[inline]
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Returns why the last acquisition failed.
    #[inline]
    #[must_use]
    pub fn last_error(&self) -> Option<&AuthFailure> {
        self.last_error.as_ref()
    }

    /// Returns this state holding `token`, with the last error cleared.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self.last_error = None;
        self
    }

    /// Returns this state with no token and `failure` recorded.
    #[must_use]
    pub fn with_failure(mut self, failure: AuthFailure) -> Self {
        self.access_token = None;
        self.last_error = Some(failure);
        self
    }
}

impl Default for CredentialState {
    fn default() -> Self {
        Self::unconfigured()
    }
}

impl fmt::Debug for CredentialState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialState")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[redacted]")
            .field("has_token", &self.access_token.is_some())
            .field("last_error", &self.last_error)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
}

/// Acquires carrier access tokens over HTTP.
#[derive(Debug, Clone)]
pub struct CredentialManager {
    http: HttpClient,
    token_url: String,
}

impl CredentialManager {
    /// Creates a manager posting to `{api_base_url}/oauth2/v3/token`.
    #[must_use]
    pub fn new(http: HttpClient, api_base_url: &str) -> Self {
        Self {
            http,
            token_url: format!("{}{}", api_base_url.trim_end_matches('/'), TOKEN_PATH),
        }
    }

    /// Returns the token endpoint URL.
    #[inline]
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Exchanges the credentials for a token, returning the updated state.
    pub async fn acquire_token(&self, state: CredentialState) -> CredentialState {
        if !state.is_configured() {
            return state.with_failure(AuthFailure::new(
                AuthFailureKind::InvalidCredentials,
                "consumer key and secret are not configured",
            ));
        }

        match self.token_request(&state).await {
            Ok(token) => {
                tracing::info!(consumer_key = %state.consumer_key(), "carrier token acquired");
                state.with_token(token)
            }
            Err(failure) => {
                tracing::warn!(
                    kind = %failure.kind(),
                    error = %failure.message(),
                    "carrier token acquisition failed"
                );
                state.with_failure(failure)
            }
        }
    }

    async fn token_request(&self, state: &CredentialState) -> Result<String, AuthFailure> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", state.consumer_key.as_str()),
            ("client_secret", state.consumer_secret.as_str()),
        ];
        let response = self.http.post_form(&self.token_url, &params).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = serde_json::from_str::<TokenErrorResponse>(&body).ok();
            let code = error.as_ref().and_then(|e| e.error.as_deref());
            let kind = AuthFailureKind::classify(status.as_u16(), code);
            let detail = error
                .as_ref()
                .and_then(|e| e.error_description.clone().or_else(|| e.error.clone()))
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(AuthFailure::new(kind, detail));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            AuthFailure::new(
                AuthFailureKind::Other,
                format!("malformed token response: {}", e),
            )
        })?;
        tracing::debug!(expires_in = ?token.expires_in, "token response received");

        token
            .access_token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                AuthFailure::new(AuthFailureKind::Other, "token response has no access_token")
            })
    }
}

#[async_trait]
impl TokenSource for CredentialManager {
    async fn acquire_token(&self, state: CredentialState) -> CredentialState {
        CredentialManager::acquire_token(self, state).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_string_contains, method, path},
    };

    fn manager(server: &MockServer) -> CredentialManager {
        CredentialManager::new(HttpClient::new(5000).unwrap(), &server.uri())
    }

    fn credentials() -> CredentialState {
        CredentialState::new("key", "secret")
    }

    mod credential_state {
        use super::*;

        #[test]
        fn blank_credentials_are_unconfigured() {
            assert!(!CredentialState::unconfigured().is_configured());
            assert!(!CredentialState::new("key", "  ").is_configured());
            assert!(credentials().is_configured());
        }

        #[test]
        fn token_clears_error() {
            let state = credentials()
                .with_failure(AuthFailure::new(AuthFailureKind::Other, "down"))
                .with_token("abc");
            assert_eq!(state.access_token(), Some("abc"));
            assert!(state.last_error().is_none());
        }

        #[test]
        fn debug_redacts_secret() {
            let debug = format!("{:?}", credentials());
            assert!(!debug.contains("secret\""));
            assert!(debug.contains("[redacted]"));
        }
    }

    #[tokio::test]
    async fn token_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_id=key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok-123",
                "token_type": "Bearer",
                "expires_in": 28800
            })))
            .mount(&server)
            .await;

        let state = manager(&server).acquire_token(credentials()).await;
        assert_eq!(state.access_token(), Some("tok-123"));
        assert!(state.last_error().is_none());
    }

    #[tokio::test]
    async fn invalid_client_is_invalid_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": "invalid_client",
                "error_description": "Client authentication failed"
            })))
            .mount(&server)
            .await;

        let state = manager(&server).acquire_token(credentials()).await;
        assert!(state.access_token().is_none());
        let failure = state.last_error().unwrap();
        assert_eq!(failure.kind(), AuthFailureKind::InvalidCredentials);
        assert_eq!(failure.message(), "Client authentication failed");
    }

    #[tokio::test]
    async fn forbidden_without_body_is_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let state = manager(&server).acquire_token(credentials()).await;
        assert_eq!(
            state.last_error().unwrap().kind(),
            AuthFailureKind::Unauthorized
        );
    }

    #[tokio::test]
    async fn server_error_is_other() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let state = manager(&server).acquire_token(credentials()).await;
        assert_eq!(state.last_error().unwrap().kind(), AuthFailureKind::Other);
    }

    #[tokio::test]
    async fn missing_access_token_is_other() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_type": "Bearer"
            })))
            .mount(&server)
            .await;

        let state = manager(&server).acquire_token(credentials()).await;
        assert!(state.access_token().is_none());
        assert_eq!(state.last_error().unwrap().kind(), AuthFailureKind::Other);
    }

    #[tokio::test]
    async fn malformed_body_is_other() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let state = manager(&server).acquire_token(credentials()).await;
        assert_eq!(state.last_error().unwrap().kind(), AuthFailureKind::Other);
    }

    #[tokio::test]
    async fn unconfigured_skips_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let state = manager(&server)
            .acquire_token(CredentialState::unconfigured())
            .await;
        assert_eq!(
            state.last_error().unwrap().kind(),
            AuthFailureKind::InvalidCredentials
        );
    }

    #[tokio::test]
    async fn unreachable_host_is_other() {
        let manager = CredentialManager::new(HttpClient::new(2000).unwrap(), "http://127.0.0.1:1");
        let state = manager.acquire_token(credentials()).await;
        assert!(state.access_token().is_none());
        assert_eq!(state.last_error().unwrap().kind(), AuthFailureKind::Other);
    }
}
