//! # Domain Errors
//!
//! Validation failures for domain value objects.
//!
//! The estimation path itself never fails on bad package data (defaults are
//! substituted instead), so these errors only surface from explicit parsing
//! of postal codes, zones and amounts.

use crate::domain::value_objects::arithmetic::ArithmeticError;
use thiserror::Error;

/// Error type for domain validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Postal code is not a 5-digit or ZIP+4 code.
    #[error("invalid postal code: '{0}'")]
    InvalidPostalCode(String),

    /// Zone is outside 1..=8.
    #[error("invalid zone: {0} (expected 1-8)")]
    InvalidZone(u8),

    /// Currency amount is negative or not representable.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Checked arithmetic failed.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
