//! # Carrier Errors
//!
//! Error types for carrier API operations.
//!
//! These never reach a checkout caller: the rate resolver logs them and falls
//! back to local estimation. They exist so that the reason for a fallback is
//! precise in logs and in [`CredentialState`](super::auth::CredentialState).
//!
//! # Examples
//!
//! ```
//! use shipquote::infrastructure::carrier::error::{AuthFailureKind, CarrierError};
//!
//! let error = CarrierError::timeout("Request timed out after 30000ms");
//! assert!(error.auth_failure_kind().is_none());
//!
//! let error = CarrierError::authentication(AuthFailureKind::Unauthorized, "bad token");
//! assert_eq!(error.auth_failure_kind(), Some(AuthFailureKind::Unauthorized));
//! ```

use std::fmt;
use thiserror::Error;

/// Category of a failed token acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthFailureKind {
    /// The consumer key or secret was rejected.
    InvalidCredentials,
    /// The credentials are valid but not allowed to use the API.
    Unauthorized,
    /// Network failures, server errors, malformed responses.
    Other,
}

impl AuthFailureKind {
    /// Categorizes a token endpoint failure from its HTTP status and OAuth
    /// error code.
    ///
    /// # Examples
    ///
    /// ```
    /// use shipquote::infrastructure::carrier::error::AuthFailureKind;
    ///
    /// assert_eq!(
    ///     AuthFailureKind::classify(400, Some("invalid_client")),
    ///     AuthFailureKind::InvalidCredentials
    /// );
    /// assert_eq!(AuthFailureKind::classify(403, None), AuthFailureKind::Unauthorized);
    /// assert_eq!(AuthFailureKind::classify(503, None), AuthFailureKind::Other);
    /// ```
    #[must_use]
    pub fn classify(status: u16, oauth_code: Option<&str>) -> Self {
        match oauth_code {
            Some("invalid_client" | "invalid_grant") => Self::InvalidCredentials,
            Some("unauthorized_client" | "access_denied") => Self::Unauthorized,
            _ => match status {
                400 => Self::InvalidCredentials,
                401 | 403 => Self::Unauthorized,
                _ => Self::Other,
            },
        }
    }
}

impl fmt::Display for AuthFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Other => write!(f, "carrier authentication error"),
        }
    }
}

/// Error type for carrier API operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarrierError {
    /// Request timed out.
    #[error("carrier timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// Network or connection error, including 5xx responses.
    #[error("carrier connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Authentication or authorization failure.
    #[error("carrier authentication error ({kind}): {message}")]
    Authentication {
        /// Failure category.
        kind: AuthFailureKind,
        /// Error message.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("carrier rate limit exceeded: {message}")]
    RateLimited {
        /// Error message.
        message: String,
    },

    /// The carrier rejected the request parameters.
    #[error("carrier invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// The response was not in the expected format.
    #[error("carrier protocol error: {message}")]
    ProtocolError {
        /// Error message.
        message: String,
    },

    /// The carrier returned no usable rate.
    #[error("carrier rate unavailable: {message}")]
    RateUnavailable {
        /// Error message.
        message: String,
    },

    /// Client-side failure, e.g. the HTTP client could not be built.
    #[error("carrier internal error: {message}")]
    InternalError {
        /// Error message.
        message: String,
    },
}

impl CarrierError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    #[must_use]
    pub fn authentication(kind: AuthFailureKind, message: impl Into<String>) -> Self {
        Self::Authentication {
            kind,
            message: message.into(),
        }
    }

    /// Creates a rate limited error.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol_error(message: impl Into<String>) -> Self {
        Self::ProtocolError {
            message: message.into(),
        }
    }

    /// Creates a rate unavailable error.
    #[must_use]
    pub fn rate_unavailable(message: impl Into<String>) -> Self {
        Self::RateUnavailable {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Returns the authentication failure category, if this is one.
    #[must_use]
    pub fn auth_failure_kind(&self) -> Option<AuthFailureKind> {
        match self {
            Self::Authentication { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Result type for carrier operations.
pub type CarrierResult<T> = Result<T, CarrierError>;
