//! # Checked Arithmetic
//!
//! Overflow-safe decimal helpers used by the rate engine.
//!
//! - [`ArithmeticError`] - Error type for arithmetic failures
//! - [`CheckedArithmetic`] - Trait for safe arithmetic on [`Decimal`]
//! - [`Rounding`] and [`div_round`] - Division with explicit rounding, used to
//!   bracket ounces into billable pounds
//!
//! # Examples
//!
//! ```
//! use shipquote::domain::value_objects::arithmetic::{div_round, Rounding};
//! use rust_decimal::Decimal;
//!
//! // 17 oz bills as 2 lb.
//! let pounds = div_round(Decimal::new(17, 0), Decimal::new(16, 0), Rounding::Up).unwrap();
//! assert_eq!(pounds, Decimal::new(2, 0));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error type for arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// Arithmetic operation resulted in overflow.
    #[error("arithmetic overflow")]
    Overflow,

    /// Division by zero attempted.
    #[error("division by zero")]
    DivisionByZero,
}

/// Result type for arithmetic operations.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Rounding direction for division operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rounding {
    /// Round towards zero (truncate).
    Down,
    /// Round away from zero.
    Up,
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Down => write!(f, "Down"),
            Self::Up => write!(f, "Up"),
        }
    }
}

/// Divide with explicit rounding direction.
///
/// # Errors
///
/// Returns `ArithmeticError::DivisionByZero` if the denominator is zero.
#[inline]
#[must_use = "this returns the result of the operation, without modifying the original"]
pub fn div_round(
    numerator: Decimal,
    denominator: Decimal,
    rounding: Rounding,
) -> ArithmeticResult<Decimal> {
    if denominator.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }

    let quotient = numerator
        .checked_div(denominator)
        .ok_or(ArithmeticError::Overflow)?;
    let truncated = quotient.trunc();

    match rounding {
        Rounding::Down => Ok(truncated),
        Rounding::Up if quotient == truncated => Ok(truncated),
        Rounding::Up if quotient.is_sign_positive() => Ok(truncated + Decimal::ONE),
        Rounding::Up => Ok(truncated - Decimal::ONE),
    }
}

/// Trait for checked arithmetic operations.
///
/// Every method returns `Err` instead of panicking.
pub trait CheckedArithmetic: Sized {
    /// Safely add two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely multiply two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self>;
}

impl CheckedArithmetic for Decimal {
    #[inline]
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_mul(rhs).ok_or(ArithmeticError::Overflow)
    }
}
