//! # Domain Enums
//!
//! Enumeration types for shipping concepts:
//!
//! - [`ServiceTier`] - Carrier service level (Economy, Ground, Priority)
//! - [`ShippingOption`] - Per-product shipping policy (calculated, free, flat)
//! - [`DataSource`] - Whether a quote came from the carrier or the local estimator
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Carrier service level.
///
/// Each tier owns a rate table, a service name and a transit estimate in the
/// rate card, and maps to a carrier mail-class code for live requests.
///
/// # Examples
///
/// ```
/// use shipquote::domain::value_objects::enums::ServiceTier;
///
/// let tier: ServiceTier = "ground".parse().unwrap();
/// assert_eq!(tier, ServiceTier::Ground);
/// assert_eq!(tier.mail_class(), "USPS_GROUND_ADVANTAGE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ServiceTier {
    /// Slowest, cheapest parcel service.
    Economy = 0,
    /// Standard ground parcel service.
    Ground = 1,
    /// Expedited service.
    Priority = 2,
}

impl ServiceTier {
    /// All tiers, cheapest first.
    pub const ALL: [ServiceTier; 3] = [Self::Economy, Self::Ground, Self::Priority];

    /// Tiers offered to shoppers unless Priority is explicitly enabled.
    pub const OFFERED: [ServiceTier; 2] = [Self::Economy, Self::Ground];

    /// Returns the carrier mail-class code submitted in live rate requests.
    #[inline]
    #[must_use]
    pub const fn mail_class(self) -> &'static str {
        match self {
            Self::Economy => "PARCEL_SELECT",
            Self::Ground => "USPS_GROUND_ADVANTAGE",
            Self::Priority => "PRIORITY_MAIL",
        }
    }
}

impl fmt::Display for ServiceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Economy => write!(f, "ECONOMY"),
            Self::Ground => write!(f, "GROUND"),
            Self::Priority => write!(f, "PRIORITY"),
        }
    }
}

impl FromStr for ServiceTier {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ECONOMY" => Ok(Self::Economy),
            "GROUND" => Ok(Self::Ground),
            "PRIORITY" => Ok(Self::Priority),
            _ => Err(ParseEnumError::InvalidValue("ServiceTier", s.to_string())),
        }
    }
}

/// Shipping policy configured on a catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingOption {
    /// Price the package against the carrier or the local rate tables.
    #[default]
    Calculated,
    /// Ship at no cost.
    Free,
    /// Ship at the product's fixed rate.
    Flat,
}

impl ShippingOption {
    /// Parses a catalog value, falling back to [`ShippingOption::Calculated`]
    /// for anything unrecognized.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for ShippingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calculated => write!(f, "calculated"),
            Self::Free => write!(f, "free"),
            Self::Flat => write!(f, "flat"),
        }
    }
}

impl FromStr for ShippingOption {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calculated" => Ok(Self::Calculated),
            "free" => Ok(Self::Free),
            "flat" | "flat_rate" | "flat-rate" => Ok(Self::Flat),
            _ => Err(ParseEnumError::InvalidValue(
                "ShippingOption",
                s.to_string(),
            )),
        }
    }
}

/// Origin of a quote's price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataSource {
    /// Price returned by the carrier rate API.
    Live,
    /// Price derived locally from zoning and rate tables, or from product policy.
    Estimated,
}

impl DataSource {
    /// Returns true if the price came from the carrier.
    #[inline]
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Live)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "LIVE"),
            Self::Estimated => write!(f, "ESTIMATED"),
        }
    }
}

/// Error type for parsing enum values from strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod service_tier {
        use super::*;

        #[test]
        fn parse_is_case_insensitive() {
            assert_eq!("Economy".parse::<ServiceTier>().unwrap(), ServiceTier::Economy);
            assert_eq!(" PRIORITY ".parse::<ServiceTier>().unwrap(), ServiceTier::Priority);
            assert!("overnight".parse::<ServiceTier>().is_err());
        }

        #[test]
        fn offered_excludes_priority() {
            assert!(!ServiceTier::OFFERED.contains(&ServiceTier::Priority));
            assert_eq!(ServiceTier::ALL.len(), 3);
        }

        #[test]
        fn mail_classes_are_distinct() {
            assert_ne!(
                ServiceTier::Economy.mail_class(),
                ServiceTier::Ground.mail_class()
            );
            assert_eq!(ServiceTier::Priority.mail_class(), "PRIORITY_MAIL");
        }

        #[test]
        fn serde_roundtrip() {
            let json = serde_json::to_string(&ServiceTier::Ground).unwrap();
            assert_eq!(json, "\"GROUND\"");
            let back: ServiceTier = serde_json::from_str(&json).unwrap();
            assert_eq!(back, ServiceTier::Ground);
        }
    }

    mod shipping_option {
        use super::*;

        #[test]
        fn lenient_parse_defaults_to_calculated() {
            assert_eq!(ShippingOption::parse_lenient("FREE"), ShippingOption::Free);
            assert_eq!(ShippingOption::parse_lenient("flat"), ShippingOption::Flat);
            assert_eq!(
                ShippingOption::parse_lenient("whatever"),
                ShippingOption::Calculated
            );
            assert_eq!(ShippingOption::parse_lenient(""), ShippingOption::Calculated);
        }

        #[test]
        fn display_is_lowercase() {
            assert_eq!(ShippingOption::Flat.to_string(), "flat");
        }
    }

    mod data_source {
        use super::*;

        #[test]
        fn display_and_is_live() {
            assert_eq!(DataSource::Live.to_string(), "LIVE");
            assert!(DataSource::Live.is_live());
            assert!(!DataSource::Estimated.is_live());
        }
    }

    #[test]
    fn parse_enum_error_display() {
        let err = ParseEnumError::InvalidValue("ServiceTier", "EXPRESS".to_string());
        assert_eq!(err.to_string(), "invalid ServiceTier value: 'EXPRESS'");
    }
}
