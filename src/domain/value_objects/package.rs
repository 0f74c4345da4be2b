//! # Package Value Objects
//!
//! Weight, dimensions and the per-request [`PackageSpec`].
//!
//! Catalog data is loosely typed: weights arrive as free text, dimensions as
//! strings like `"10x8x4"`, and either may be missing. Bad values are never
//! rejected. [`PackageSpec::from_raw`] substitutes the documented defaults
//! once, at construction, so rating code only ever sees valid values.
//!
//! | Field | Default |
//! |---|---|
//! | weight | 6 oz |
//! | dimensions | 7.5 x 5.0 x 0.8 in |
//! | flat rate | $5.00 |
//!
//! # Examples
//!
//! ```
//! use shipquote::domain::value_objects::package::{Dimensions, PackageSpec, RawPackage};
//! use shipquote::domain::value_objects::enums::ShippingOption;
//!
//! let spec = PackageSpec::from_raw(&RawPackage {
//!     weight: Some("not a number".to_string()),
//!     dimensions: Some("12 x 9 x 3".to_string()),
//!     shipping_option: Some("calculated".to_string()),
//!     flat_rate: None,
//! });
//!
//! assert_eq!(spec.weight().ounces(), rust_decimal::Decimal::new(6, 0));
//! assert_eq!(spec.dimensions().max_dimension(), 12.0);
//! assert_eq!(spec.shipping_option(), ShippingOption::Calculated);
//! ```

use crate::domain::value_objects::arithmetic::{Rounding, div_round};
use crate::domain::value_objects::enums::ShippingOption;
use crate::domain::value_objects::rate::Rate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Weight used when the catalog value is missing or unusable, in ounces.
pub const DEFAULT_WEIGHT_OZ: i64 = 6;

/// Raw weights above this value are read as pounds rather than ounces.
pub const POUNDS_THRESHOLD: f64 = 50.0;

/// Divisor for dimensional weight, in cubic inches per pound.
pub const DIM_WEIGHT_DIVISOR: f64 = 166.0;

/// Flat shipping charge used when a flat-rate product has no rate set.
pub const DEFAULT_FLAT_RATE_CENTS: i64 = 500;

const OUNCES_PER_POUND: i64 = 16;

/// Package weight, stored in ounces.
///
/// # Invariants
///
/// - Always positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Weight {
    ounces: Decimal,
}

impl Weight {
    /// Creates a weight from ounces, returning `None` for non-positive or
    /// non-finite input.
    #[must_use]
    pub fn from_ounces(ounces: f64) -> Option<Self> {
        if !ounces.is_finite() || ounces <= 0.0 {
            return None;
        }
        Decimal::try_from(ounces).ok().map(|ounces| Self { ounces })
    }

    /// Creates a weight from pounds, returning `None` for non-positive or
    /// non-finite input.
    #[must_use]
    pub fn from_pounds(pounds: f64) -> Option<Self> {
        Self::from_ounces(pounds * OUNCES_PER_POUND as f64)
    }

    /// Interprets a catalog weight value.
    ///
    /// Values up to [`POUNDS_THRESHOLD`] are ounces; larger values are pounds.
    /// Non-positive and non-finite values yield the default weight.
    #[must_use]
    pub fn from_raw(value: f64) -> Self {
        let weight = if value > POUNDS_THRESHOLD {
            Self::from_pounds(value)
        } else {
            Self::from_ounces(value)
        };
        weight.unwrap_or_default()
    }

    /// Parses a catalog weight string, falling back to the default weight.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        value
            .trim()
            .parse::<f64>()
            .map(Self::from_raw)
            .unwrap_or_default()
    }

    /// Returns the weight in ounces.
    #[inline]
    #[must_use]
    pub fn ounces(&self) -> Decimal {
        self.ounces
    }

    /// Returns the weight in (fractional) pounds.
    #[must_use]
    pub fn pounds(&self) -> Decimal {
        self.ounces / Decimal::from(OUNCES_PER_POUND)
    }

    /// Returns the weight rounded up to whole pounds, never less than 1.
    #[must_use]
    pub fn billable_pounds(&self) -> u32 {
        div_round(self.ounces, Decimal::from(OUNCES_PER_POUND), Rounding::Up)
            .ok()
            .and_then(|lb| lb.to_u32())
            .unwrap_or(u32::MAX)
            .max(1)
    }

    /// Splits the weight into whole pounds and remaining ounces.
    #[must_use]
    pub fn pounds_and_ounces(&self) -> (u32, Decimal) {
        let per_pound = Decimal::from(OUNCES_PER_POUND);
        let whole = div_round(self.ounces, per_pound, Rounding::Down).unwrap_or(Decimal::ZERO);
        let remainder = self.ounces - whole * per_pound;
        (whole.to_u32().unwrap_or(u32::MAX), remainder)
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self {
            ounces: Decimal::from(DEFAULT_WEIGHT_OZ),
        }
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} oz", self.ounces.normalize())
    }
}

/// Package dimensions in inches.
///
/// # Invariants
///
/// - All three sides are finite and positive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    length: f64,
    width: f64,
    height: f64,
}

impl Dimensions {
    /// Default package size: a padded mailer.
    pub const DEFAULT: Dimensions = Dimensions {
        length: 7.5,
        width: 5.0,
        height: 0.8,
    };

    /// Creates dimensions, returning `None` unless every side is positive.
    #[must_use]
    pub fn new(length: f64, width: f64, height: f64) -> Option<Self> {
        let valid = |side: f64| side.is_finite() && side > 0.0;
        (valid(length) && valid(width) && valid(height)).then_some(Self {
            length,
            width,
            height,
        })
    }

    /// Parses `"L x W x H"`.
    ///
    /// Sides may be separated by `x`, `X`, `×`, `*` or whitespace, in any
    /// combination. Returns `None` unless exactly three positive numbers are
    /// found.
    ///
    /// ```
    /// use shipquote::domain::value_objects::package::Dimensions;
    ///
    /// assert!(Dimensions::parse("10×8×4").is_some());
    /// assert!(Dimensions::parse("10 * 8 * 4").is_some());
    /// assert!(Dimensions::parse("10x8").is_none());
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let sides: Vec<f64> = value
            .split(|c: char| matches!(c, 'x' | 'X' | '×' | '*') || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(str::parse::<f64>)
            .collect::<Result<_, _>>()
            .ok()?;

        match sides.as_slice() {
            [length, width, height] => Self::new(*length, *width, *height),
            _ => None,
        }
    }

    /// Parses dimensions, falling back to [`Dimensions::DEFAULT`].
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    /// Returns the length.
    #[inline]
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns the width.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the height.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the volume in cubic inches.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }

    /// Returns the longest side.
    #[must_use]
    pub fn max_dimension(&self) -> f64 {
        self.length.max(self.width).max(self.height)
    }

    /// Returns the dimensional weight in pounds (`volume / 166`).
    #[must_use]
    pub fn dimensional_weight_lb(&self) -> f64 {
        self.volume() / DIM_WEIGHT_DIVISOR
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{} in", self.length, self.width, self.height)
    }
}

/// Loosely typed package attributes as stored by the product catalog.
///
/// Numeric fields accept either JSON numbers or strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPackage {
    /// Weight (ounces, or pounds if above 50).
    #[serde(default, deserialize_with = "loose_string")]
    pub weight: Option<String>,
    /// Dimension string such as `"10x8x4"`.
    #[serde(default, deserialize_with = "loose_string")]
    pub dimensions: Option<String>,
    /// One of `calculated`, `free`, `flat`.
    #[serde(default, alias = "shippingOption", deserialize_with = "loose_string")]
    pub shipping_option: Option<String>,
    /// Flat shipping charge, used when `shipping_option` is `flat`.
    #[serde(default, alias = "flatRate", deserialize_with = "loose_string")]
    pub flat_rate: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseValue {
    Text(String),
    Number(f64),
}

fn loose_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(
        Option::<LooseValue>::deserialize(deserializer)?.map(|value| match value {
            LooseValue::Text(text) => text,
            LooseValue::Number(number) => number.to_string(),
        }),
    )
}

/// Everything the rate engine needs to know about one package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageSpec {
    weight: Weight,
    dimensions: Dimensions,
    shipping_option: ShippingOption,
    flat_rate: Option<Rate>,
}

impl PackageSpec {
    /// Creates a package priced by the carrier or the local estimator.
    #[must_use]
    pub fn calculated(weight: Weight, dimensions: Dimensions) -> Self {
        Self {
            weight,
            dimensions,
            shipping_option: ShippingOption::Calculated,
            flat_rate: None,
        }
    }

    /// Creates a free-shipping package.
    #[must_use]
    pub fn free() -> Self {
        Self {
            weight: Weight::default(),
            dimensions: Dimensions::default(),
            shipping_option: ShippingOption::Free,
            flat_rate: None,
        }
    }

    /// Creates a flat-rate package.
    #[must_use]
    pub fn flat(rate: Option<Rate>) -> Self {
        Self {
            weight: Weight::default(),
            dimensions: Dimensions::default(),
            shipping_option: ShippingOption::Flat,
            flat_rate: rate,
        }
    }

    /// Builds a spec from catalog attributes, substituting defaults for
    /// anything missing or unusable.
    #[must_use]
    pub fn from_raw(raw: &RawPackage) -> Self {
        let weight = raw
            .weight
            .as_deref()
            .map(Weight::parse_lenient)
            .unwrap_or_default();
        let dimensions = raw
            .dimensions
            .as_deref()
            .map(Dimensions::parse_lenient)
            .unwrap_or_default();
        let shipping_option = raw
            .shipping_option
            .as_deref()
            .map(ShippingOption::parse_lenient)
            .unwrap_or_default();
        let flat_rate = raw
            .flat_rate
            .as_deref()
            .and_then(|value| value.trim().parse::<f64>().ok())
            .and_then(|value| Rate::from_f64(value).ok());

        tracing::trace!(
            %weight,
            %dimensions,
            %shipping_option,
            "package attributes resolved"
        );

        Self {
            weight,
            dimensions,
            shipping_option,
            flat_rate,
        }
    }

    /// Returns the weight.
    #[inline]
    #[must_use]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Returns the dimensions.
    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Returns the shipping option.
    #[inline]
    #[must_use]
    pub fn shipping_option(&self) -> ShippingOption {
        self.shipping_option
    }

    /// Returns the configured flat rate, if any.
    #[inline]
    #[must_use]
    pub fn flat_rate(&self) -> Option<Rate> {
        self.flat_rate
    }

    /// Returns the flat rate, or $5.00 when unset.
    #[must_use]
    pub fn flat_rate_or_default(&self) -> Rate {
        self.flat_rate
            .unwrap_or_else(|| Rate::clamped(Decimal::new(DEFAULT_FLAT_RATE_CENTS, 2)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod weight {
        use super::*;

        #[test]
        fn small_values_are_ounces() {
            let w = Weight::from_raw(12.0);
            assert_eq!(w.ounces(), Decimal::new(12, 0));
            assert_eq!(w.billable_pounds(), 1);
        }

        #[test]
        fn large_values_are_pounds() {
            let w = Weight::from_raw(60.0);
            assert_eq!(w.ounces(), Decimal::new(960, 0));
            assert_eq!(w.billable_pounds(), 60);
        }

        #[test]
        fn fifty_is_still_ounces() {
            let w = Weight::from_raw(50.0);
            assert_eq!(w.billable_pounds(), 4);
        }

        #[test]
        fn invalid_values_default() {
            for bad in [0.0, -3.0, f64::NAN, f64::INFINITY] {
                assert_eq!(Weight::from_raw(bad), Weight::default());
            }
            assert_eq!(Weight::parse_lenient("heavy"), Weight::default());
            assert_eq!(Weight::parse_lenient(""), Weight::default());
            assert_eq!(Weight::default().ounces(), Decimal::new(6, 0));
        }

        #[test]
        fn billable_pounds_rounds_up() {
            assert_eq!(Weight::from_ounces(16.0).unwrap().billable_pounds(), 1);
            assert_eq!(Weight::from_ounces(16.5).unwrap().billable_pounds(), 2);
            assert_eq!(Weight::from_ounces(0.1).unwrap().billable_pounds(), 1);
        }

        #[test]
        fn pounds_and_ounces_split() {
            let (lb, oz) = Weight::from_ounces(38.0).unwrap().pounds_and_ounces();
            assert_eq!(lb, 2);
            assert_eq!(oz, Decimal::new(6, 0));

            let (lb, oz) = Weight::default().pounds_and_ounces();
            assert_eq!(lb, 0);
            assert_eq!(oz, Decimal::new(6, 0));
        }
    }

    mod dimensions {
        use super::*;

        #[test]
        fn parses_all_separators() {
            for input in ["10x8x4", "10X8X4", "10×8×4", "10*8*4", "10 8 4", " 10 x 8 x 4 "] {
                let dims = Dimensions::parse(input).unwrap();
                assert_eq!((dims.length(), dims.width(), dims.height()), (10.0, 8.0, 4.0));
            }
        }

        #[test]
        fn rejects_wrong_arity_and_non_positive() {
            assert!(Dimensions::parse("10x8").is_none());
            assert!(Dimensions::parse("10x8x4x2").is_none());
            assert!(Dimensions::parse("10x0x4").is_none());
            assert!(Dimensions::parse("10x-8x4").is_none());
            assert!(Dimensions::parse("ten by eight").is_none());
        }

        #[test]
        fn lenient_parse_defaults() {
            assert_eq!(Dimensions::parse_lenient("garbage"), Dimensions::DEFAULT);
        }

        #[test]
        fn geometry() {
            let dims = Dimensions::parse("30x25x20").unwrap();
            assert_eq!(dims.volume(), 15000.0);
            assert_eq!(dims.max_dimension(), 30.0);
            assert!((dims.dimensional_weight_lb() - 90.36).abs() < 0.01);
        }

        #[test]
        fn default_mailer_is_tiny() {
            assert!((Dimensions::DEFAULT.volume() - 30.0).abs() < 1e-9);
        }
    }

    mod package_spec {
        use super::*;

        #[test]
        fn from_raw_applies_defaults() {
            let spec = PackageSpec::from_raw(&RawPackage::default());
            assert_eq!(spec.weight(), Weight::default());
            assert_eq!(spec.dimensions(), Dimensions::DEFAULT);
            assert_eq!(spec.shipping_option(), ShippingOption::Calculated);
            assert!(spec.flat_rate().is_none());
        }

        #[test]
        fn flat_rate_default_is_five_dollars() {
            let spec = PackageSpec::flat(None);
            assert_eq!(spec.flat_rate_or_default().amount(), Decimal::new(500, 2));
        }

        #[test]
        fn negative_flat_rate_is_ignored() {
            let spec = PackageSpec::from_raw(&RawPackage {
                shipping_option: Some("flat".to_string()),
                flat_rate: Some("-2".to_string()),
                ..RawPackage::default()
            });
            assert_eq!(spec.flat_rate_or_default().amount(), Decimal::new(500, 2));
        }

        #[test]
        fn deserializes_numbers_and_camel_case() {
            let raw: RawPackage = serde_json::from_str(
                r#"{"weight": 20, "dimensions": "6x6x6", "shippingOption": "flat", "flatRate": 7.99}"#,
            )
            .unwrap();
            let spec = PackageSpec::from_raw(&raw);
            assert_eq!(spec.weight().ounces(), Decimal::new(20, 0));
            assert_eq!(spec.shipping_option(), ShippingOption::Flat);
            assert_eq!(spec.flat_rate_or_default().amount(), Decimal::new(799, 2));
        }
    }
}
