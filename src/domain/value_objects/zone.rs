//! # Zone Value Object
//!
//! Distance-based pricing zone, 1 (nearest) through 8 (farthest).

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pricing zone.
///
/// # Invariants
///
/// - Always within `Zone::MIN..=Zone::MAX`
///
/// # Examples
///
/// ```
/// use shipquote::domain::value_objects::zone::Zone;
///
/// let zone = Zone::new(3).unwrap();
/// assert_eq!(zone.index(), 2);
/// assert!(Zone::new(9).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Zone(u8);

impl Zone {
    /// Nearest zone, also used for quotes that bypass geography.
    pub const MIN: Zone = Zone(1);
    /// Farthest zone.
    pub const MAX: Zone = Zone(8);
    /// Number of zones.
    pub const COUNT: usize = 8;

    /// Creates a zone.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidZone` outside 1..=8.
    pub fn new(value: u8) -> DomainResult<Self> {
        if (Self::MIN.0..=Self::MAX.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidZone(value))
        }
    }

    /// Returns the zone number.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the zero-based column index into rate tables.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Iterates over all zones in order.
    pub fn all() -> impl Iterator<Item = Zone> {
        (Self::MIN.0..=Self::MAX.0).map(Zone)
    }
}

impl TryFrom<u8> for Zone {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Zone> for u8 {
    fn from(zone: Zone) -> Self {
        zone.0
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
