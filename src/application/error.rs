//! # Application Errors
//!
//! Error types for engine construction.
//!
//! Quoting itself never fails; carrier problems degrade to local estimates.
//! Only building an engine can go wrong.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Configuration(String)     - Missing or malformed settings
//! ├── RateCard(RateCardError)   - Custom rate card unreadable or invalid
//! ├── Carrier(CarrierError)     - HTTP client could not be built
//! └── Domain(DomainError)       - Invalid value in configuration
//! ```
//!
//! # Examples
//!
//! ```
//! use shipquote::application::error::ApplicationError;
//! use shipquote::domain::DomainError;
//!
//! let err = ApplicationError::configuration("timeout_ms must be positive");
//! assert!(err.to_string().contains("timeout_ms"));
//!
//! let err: ApplicationError = DomainError::InvalidPostalCode("abc".into()).into();
//! assert!(matches!(err, ApplicationError::Domain(_)));
//! ```

use crate::domain::errors::DomainError;
use crate::domain::services::rate_table::RateCardError;
use crate::infrastructure::carrier::error::CarrierError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Configuration could not be loaded or is invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Rate card could not be loaded.
    #[error("rate card error: {0}")]
    RateCard(#[from] RateCardError),

    /// Carrier client could not be created.
    #[error("carrier error: {0}")]
    Carrier(#[from] CarrierError),

    /// Domain error from an invalid configured value.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
}

impl ApplicationError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

impl From<config::ConfigError> for ApplicationError {
    fn from(error: config::ConfigError) -> Self {
        Self::Configuration(error.to_string())
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
