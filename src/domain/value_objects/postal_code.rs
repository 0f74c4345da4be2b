//! # Postal Code Value Object
//!
//! US ZIP code in 5-digit or ZIP+4 form.
//!
//! Only the 5-digit part matters for rating: the first three digits (the
//! sectional center prefix) drive zoning, and the first digit selects a
//! coarse national region.
//!
//! # Examples
//!
//! ```
//! use shipquote::domain::value_objects::postal_code::PostalCode;
//!
//! let zip: PostalCode = "90210-1234".parse().unwrap();
//! assert_eq!(zip.five_digit(), "90210");
//! assert_eq!(zip.prefix(), "902");
//! assert_eq!(zip.region_digit(), 9);
//! ```

use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated US postal code.
///
/// # Invariants
///
/// - `code` holds exactly five ASCII digits
/// - `plus_four` holds exactly four ASCII digits when present
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode {
    code: String,
    plus_four: Option<String>,
}

impl PostalCode {
    /// Creates a code from a literal known to be five digits.
    pub(crate) fn from_static(code: &'static str) -> Self {
        debug_assert!(Self::all_digits(code, 5));
        Self {
            code: code.to_string(),
            plus_four: None,
        }
    }

    /// Returns the 5-digit code.
    #[inline]
    #[must_use]
    pub fn five_digit(&self) -> &str {
        &self.code
    }

    /// Returns the ZIP+4 extension, if any.
    #[inline]
    #[must_use]
    pub fn plus_four(&self) -> Option<&str> {
        self.plus_four.as_deref()
    }

    /// Returns the 3-digit sectional prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.code.get(..3).unwrap_or(&self.code)
    }

    /// Returns the leading digit (0-9), which identifies the national region.
    #[must_use]
    pub fn region_digit(&self) -> u8 {
        self.code
            .bytes()
            .next()
            .map(|b| b.saturating_sub(b'0'))
            .unwrap_or(0)
    }

    /// Returns true if both codes share a 3-digit prefix.
    #[must_use]
    pub fn shares_prefix_with(&self, other: &PostalCode) -> bool {
        self.prefix() == other.prefix()
    }

    fn all_digits(s: &str, len: usize) -> bool {
        s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
    }
}

impl FromStr for PostalCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || DomainError::InvalidPostalCode(s.to_string());

        let (code, plus_four) = match trimmed.split_once('-') {
            Some((code, ext)) => (code, Some(ext)),
            None if trimmed.len() == 9 => {
                let (code, ext) = trimmed.split_at_checked(5).ok_or_else(invalid)?;
                (code, Some(ext))
            }
            None => (trimmed, None),
        };

        if !Self::all_digits(code, 5) {
            return Err(invalid());
        }
        if let Some(ext) = plus_four
            && !Self::all_digits(ext, 4)
        {
            return Err(invalid());
        }

        Ok(Self {
            code: code.to_string(),
            plus_four: plus_four.map(str::to_string),
        })
    }
}

impl TryFrom<String> for PostalCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PostalCode> for String {
    fn from(value: PostalCode) -> Self {
        value.to_string()
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.plus_four {
            Some(ext) => write!(f, "{}-{}", self.code, ext),
            None => write!(f, "{}", self.code),
        }
    }
}
