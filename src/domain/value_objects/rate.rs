//! # Rate Value Object
//!
//! Non-negative currency amount for shipping charges.
//!
//! # Examples
//!
//! ```
//! use shipquote::domain::value_objects::rate::Rate;
//! use rust_decimal::Decimal;
//!
//! let rate = Rate::new(Decimal::new(799, 2)).unwrap();
//! assert_eq!(rate.to_string(), "$7.99");
//! assert!(Rate::new(Decimal::new(-1, 0)).is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::arithmetic::CheckedArithmetic;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A shipping charge in dollars.
///
/// # Invariants
///
/// - Never negative
/// - Always rounded to whole cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Rate(Decimal);

impl Rate {
    /// Zero charge.
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// Creates a rate, rounding to cents.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` if the amount is negative.
    pub fn new(amount: Decimal) -> DomainResult<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::InvalidAmount(amount.to_string()));
        }
        Ok(Self(Self::round_cents(amount)))
    }

    /// Creates a rate from a float, as read from loosely typed catalog data.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` if the value is not finite or is
    /// negative.
    pub fn from_f64(amount: f64) -> DomainResult<Self> {
        let decimal = Decimal::try_from(amount)
            .map_err(|_| DomainError::InvalidAmount(amount.to_string()))?;
        Self::new(decimal)
    }

    /// Creates a rate, treating negative amounts as zero.
    #[must_use]
    pub fn clamped(amount: Decimal) -> Self {
        Self(Self::round_cents(amount.max(Decimal::ZERO)))
    }

    /// Returns the amount in dollars.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if this is a zero charge.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Adds another rate.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` on overflow.
    pub fn checked_add(self, other: Rate) -> DomainResult<Self> {
        Ok(Self(self.0.safe_add(other.0)?))
    }

    fn round_cents(amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl<'de> Deserialize<'de> for Rate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as serde::Deserialize>::deserialize(deserializer)?;
        Rate::new(amount).map_err(serde::de::Error::custom)
    }
}

impl From<Rate> for Decimal {
    fn from(rate: Rate) -> Self {
        rate.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_cents() {
        let rate = Rate::new(Decimal::new(12345, 3)).unwrap();
        assert_eq!(rate.amount(), Decimal::new(1235, 2));
    }

    #[test]
    fn rejects_negative() {
        assert!(matches!(
            Rate::new(Decimal::new(-5, 0)),
            Err(DomainError::InvalidAmount(_))
        ));
    }

    #[test]
    fn clamped_floors_at_zero() {
        assert_eq!(Rate::clamped(Decimal::new(-300, 2)), Rate::ZERO);
        assert_eq!(Rate::clamped(Decimal::new(300, 2)).amount(), Decimal::new(3, 0));
    }

    #[test]
    fn from_f64_rejects_nan() {
        assert!(Rate::from_f64(f64::NAN).is_err());
        assert_eq!(Rate::from_f64(7.99).unwrap().amount(), Decimal::new(799, 2));
    }

    #[test]
    fn checked_add_sums() {
        let a = Rate::new(Decimal::new(475, 2)).unwrap();
        let b = Rate::new(Decimal::new(1500, 2)).unwrap();
        assert_eq!(a.checked_add(b).unwrap().amount(), Decimal::new(1975, 2));
    }

    #[test]
    fn display_has_two_decimals() {
        assert_eq!(Rate::ZERO.to_string(), "$0.00");
        assert_eq!(Rate::new(Decimal::new(5, 0)).unwrap().to_string(), "$5.00");
    }

    #[test]
    fn deserialize_rejects_negative() {
        let ok: Rate = serde_json::from_str("\"4.75\"").unwrap();
        assert_eq!(ok.amount(), Decimal::new(475, 2));
        assert!(serde_json::from_str::<Rate>("\"-1.00\"").is_err());
    }
}
