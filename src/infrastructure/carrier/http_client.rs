//! # HTTP Client Utilities
//!
//! Shared HTTP client for the carrier token and rate endpoints.
//!
//! Provides a reqwest wrapper with:
//! - A fixed per-request timeout
//! - JSON and form-encoded POST
//! - Status code to [`CarrierError`] mapping

use crate::infrastructure::carrier::error::{AuthFailureKind, CarrierError, CarrierResult};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default carrier request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// HTTP client wrapper for carrier calls.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::InternalError` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> CarrierResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| {
                CarrierError::internal_error(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a form-encoded POST and returns the raw response.
    ///
    /// Status handling is left to the caller, since the OAuth error body
    /// carries more detail than the status code.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::Timeout` or `CarrierError::Connection` if the
    /// request cannot be sent.
    pub async fn post_form<F: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        form: &F,
    ) -> CarrierResult<Response> {
        self.client
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))
    }

    /// Makes a POST request with JSON body and custom headers.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::Timeout` or `CarrierError::Connection` if the
    /// request fails, a status-specific error for non-2xx responses and
    /// `CarrierError::ProtocolError` if the response cannot be parsed.
    pub async fn post_with_headers<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
        headers: HeaderMap,
    ) -> CarrierResult<T> {
        let response = self
            .client
            .post(url)
            .json(body)
            .headers(headers)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Builds an `Authorization: Bearer` header map.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::InvalidRequest` if the token contains characters
    /// not allowed in a header.
    pub fn bearer_headers(token: &str) -> CarrierResult<HeaderMap> {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| CarrierError::invalid_request("access token is not a valid header value"))?;
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    /// Handles the HTTP response, checking status and deserializing JSON.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> CarrierResult<T> {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| {
                CarrierError::protocol_error(format!("Failed to parse response: {}", e))
            })
        } else {
            let error_body = response.text().await.unwrap_or_default();
            Err(map_status_error(status, &error_body))
        }
    }

    /// Maps a reqwest error to a CarrierError.
    fn map_reqwest_error(&self, error: reqwest::Error) -> CarrierError {
        if error.is_timeout() {
            CarrierError::timeout_with_duration("Request timed out", self.timeout_ms)
        } else if error.is_connect() {
            CarrierError::connection(format!("Connection failed: {}", error))
        } else {
            CarrierError::connection(format!("HTTP request failed: {}", error))
        }
    }
}

/// Maps an HTTP status code to a CarrierError.
#[must_use]
pub fn map_status_error(status: StatusCode, body: &str) -> CarrierError {
    match status {
        StatusCode::BAD_REQUEST => CarrierError::invalid_request(format!("Bad request: {}", body)),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CarrierError::authentication(
            AuthFailureKind::Unauthorized,
            format!("Authentication failed: {}", body),
        ),
        StatusCode::NOT_FOUND => {
            CarrierError::rate_unavailable(format!("Resource not found: {}", body))
        }
        StatusCode::TOO_MANY_REQUESTS => CarrierError::rate_limited("Rate limit exceeded"),
        s if s.is_server_error() => {
            CarrierError::connection(format!("Server error ({}): {}", status, body))
        }
        _ => CarrierError::protocol_error(format!("HTTP error ({}): {}", status, body)),
    }
}
