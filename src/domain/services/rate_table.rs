//! # Rate Table Engine
//!
//! Tabulated base rates and size surcharges per service tier.
//!
//! All tiers are loaded from one declarative TOML rate card. The card that
//! ships with the crate is embedded at compile time; deployments may supply
//! their own file with the same layout.
//!
//! # Base Rate Lookup
//!
//! ```text
//! pounds = max(1, ceil(weight_lb))
//! pounds <= 10 : base_rates[pounds][zone]
//! pounds  > 10 : base_rates[10][zone] + (pounds - 10) * per_pound[zone]
//! ```
//!
//! # Size Surcharge
//!
//! ```text
//! volume > 1728 or longest side > 22  -> large-package surcharge
//! else volume > 864                   -> medium surcharge (tiers that have one)
//! longest side >= 30                 -> + oversize surcharge
//! ```
//!
//! Dimensional weight (`volume / 166`) is reported alongside the surcharge
//! but does not change the weight bracket used for the base rate.
//!
//! # Examples
//!
//! ```
//! use shipquote::domain::services::rate_table::RateCard;
//! use shipquote::domain::value_objects::{ServiceTier, Zone};
//! use rust_decimal::Decimal;
//!
//! let card = RateCard::embedded().unwrap();
//! let rate = card.lookup_base_rate(ServiceTier::Ground, Zone::MIN, Decimal::new(5, 1));
//! assert_eq!(rate.amount(), Decimal::new(475, 2));
//! ```

use crate::domain::value_objects::arithmetic::CheckedArithmetic;
use crate::domain::value_objects::{Dimensions, Rate, ServiceTier, Weight, Zone};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Rate card shipped with the crate.
const EMBEDDED_RATE_CARD: &str = include_str!("../../../data/rate_card.toml");

/// Heaviest tabulated weight row, in pounds.
pub const MAX_TABLE_POUNDS: u32 = 10;

/// Volume above which the large-package surcharge applies, in cubic inches.
pub const LARGE_VOLUME_CUBIC_IN: f64 = 1728.0;

/// Longest side above which the large-package surcharge applies, in inches.
pub const LARGE_MAX_DIMENSION_IN: f64 = 22.0;

/// Volume above which the medium surcharge applies, in cubic inches.
pub const MEDIUM_VOLUME_CUBIC_IN: f64 = 864.0;

/// Longest side at or above which the oversize surcharge applies, in inches.
pub const OVERSIZE_MAX_DIMENSION_IN: f64 = 30.0;

/// Error type for loading a rate card.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateCardError {
    /// The rate card file could not be read.
    #[error("cannot read rate card {path}: {message}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying error message.
        message: String,
    },

    /// The document is not valid TOML or does not match the expected layout.
    #[error("rate card parse error: {0}")]
    Parse(String),

    /// A tier contains a negative amount.
    #[error("rate card tier {tier}: negative amount in {field}")]
    NegativeAmount {
        /// Offending tier.
        tier: ServiceTier,
        /// Offending field.
        field: &'static str,
    },

    /// A tier charges less for a heavier or farther package.
    #[error("rate card tier {tier}: {detail}")]
    NotMonotonic {
        /// Offending tier.
        tier: ServiceTier,
        /// Description of the first violation found.
        detail: String,
    },
}

/// Size category driving the surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SizeClass {
    /// No size surcharge.
    Standard,
    /// Volume above 864 cubic inches.
    Medium,
    /// Volume above 1728 cubic inches or a side longer than 22 inches.
    Large,
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "STANDARD"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::Large => write!(f, "LARGE"),
        }
    }
}

/// Result of evaluating a package's size against a tier's surcharge rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeAssessment {
    /// Volume in cubic inches.
    pub volume: f64,
    /// Longest side in inches.
    pub max_dimension: f64,
    /// Dimensional weight in pounds, for reference.
    pub dimensional_weight_lb: f64,
    /// Size category.
    pub class: SizeClass,
    /// Whether the oversize addend applies.
    pub oversize: bool,
    /// Total size surcharge.
    pub surcharge: Rate,
}

/// Rate table for a single service tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    service_name: String,
    transit_estimate: String,
    base_rates: [[Decimal; Zone::COUNT]; MAX_TABLE_POUNDS as usize],
    per_pound: [Decimal; Zone::COUNT],
    large_package_surcharge: Decimal,
    #[serde(default)]
    medium_package_surcharge: Option<Decimal>,
    oversize_surcharge: Decimal,
}

impl RateTable {
    /// Returns the service name shown to shoppers.
    #[inline]
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Returns the delivery estimate shown to shoppers.
    #[inline]
    #[must_use]
    pub fn transit_estimate(&self) -> &str {
        &self.transit_estimate
    }

    /// Returns the base rate for whole pounds in a zone.
    #[must_use]
    pub fn base_rate(&self, zone: Zone, pounds: u32) -> Rate {
        let pounds = pounds.max(1);
        let row = pounds.min(MAX_TABLE_POUNDS);
        let tabulated = self.cell(row, zone);

        if pounds <= MAX_TABLE_POUNDS {
            return Rate::clamped(tabulated);
        }

        let extra_pounds = Decimal::from(pounds - MAX_TABLE_POUNDS);
        let increment = self.per_pound.get(zone.index()).copied().unwrap_or_default();
        let total = increment
            .safe_mul(extra_pounds)
            .and_then(|extra| tabulated.safe_add(extra))
            .unwrap_or(Decimal::MAX);
        Rate::clamped(total)
    }

    /// Evaluates the size surcharge for a package.
    #[must_use]
    pub fn size_surcharge(&self, dimensions: &Dimensions) -> SizeAssessment {
        let volume = dimensions.volume();
        let max_dimension = dimensions.max_dimension();

        let (class, mut surcharge) =
            if volume > LARGE_VOLUME_CUBIC_IN || max_dimension > LARGE_MAX_DIMENSION_IN {
                (SizeClass::Large, self.large_package_surcharge)
            } else if volume > MEDIUM_VOLUME_CUBIC_IN {
                (
                    SizeClass::Medium,
                    self.medium_package_surcharge.unwrap_or_default(),
                )
            } else {
                (SizeClass::Standard, Decimal::ZERO)
            };

        let oversize = max_dimension >= OVERSIZE_MAX_DIMENSION_IN;
        if oversize {
            surcharge = surcharge
                .safe_add(self.oversize_surcharge)
                .unwrap_or(Decimal::MAX);
        }

        SizeAssessment {
            volume,
            max_dimension,
            dimensional_weight_lb: dimensions.dimensional_weight_lb(),
            class,
            oversize,
            surcharge: Rate::clamped(surcharge),
        }
    }

    // Rows are bounded by MAX_TABLE_POUNDS and columns by Zone.
    fn cell(&self, pounds: u32, zone: Zone) -> Decimal {
        let row = pounds.saturating_sub(1) as usize;
        self.base_rates
            .get(row)
            .and_then(|columns| columns.get(zone.index()))
            .copied()
            .unwrap_or_default()
    }

    fn validate(&self, tier: ServiceTier) -> Result<(), RateCardError> {
        let negative = |field: &'static str| RateCardError::NegativeAmount { tier, field };

        if self.base_rates.iter().flatten().any(Decimal::is_sign_negative) {
            return Err(negative("base_rates"));
        }
        if self.per_pound.iter().any(Decimal::is_sign_negative) {
            return Err(negative("per_pound"));
        }
        if self.large_package_surcharge.is_sign_negative()
            || self.oversize_surcharge.is_sign_negative()
            || self
                .medium_package_surcharge
                .is_some_and(|amount| amount.is_sign_negative())
        {
            return Err(negative("surcharges"));
        }

        for pounds in 1..=MAX_TABLE_POUNDS {
            for zone in Zone::all() {
                let here = self.cell(pounds, zone);
                if pounds > 1 && self.cell(pounds - 1, zone) > here {
                    return Err(RateCardError::NotMonotonic {
                        tier,
                        detail: format!("{pounds} lb is cheaper than {} lb in zone {zone}", pounds - 1),
                    });
                }
                if let Ok(previous) = Zone::new(zone.get().saturating_sub(1))
                    && self.cell(pounds, previous) > here
                {
                    return Err(RateCardError::NotMonotonic {
                        tier,
                        detail: format!("zone {zone} is cheaper than zone {previous} at {pounds} lb"),
                    });
                }
            }
        }

        let per_pound_decreases = self.per_pound.windows(2).any(|pair| match pair {
            [nearer, farther] => nearer > farther,
            _ => false,
        });
        if per_pound_decreases {
            return Err(RateCardError::NotMonotonic {
                tier,
                detail: "per_pound decreases with zone".to_string(),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RateCardDocument {
    tiers: TierTables,
}

#[derive(Debug, Deserialize)]
struct TierTables {
    economy: RateTable,
    ground: RateTable,
    priority: RateTable,
}

/// The complete set of rate tables, one per service tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateCard {
    economy: RateTable,
    ground: RateTable,
    priority: RateTable,
}

impl RateCard {
    /// Loads the rate card embedded in the crate.
    ///
    /// # Errors
    ///
    /// Returns `RateCardError` if the embedded document is malformed.
    pub fn embedded() -> Result<Self, RateCardError> {
        Self::from_toml_str(EMBEDDED_RATE_CARD)
    }

    /// Parses and validates a rate card document.
    ///
    /// # Errors
    ///
    /// Returns `RateCardError::Parse` for malformed TOML or wrong table
    /// shapes, `NegativeAmount` or `NotMonotonic` for invalid contents.
    pub fn from_toml_str(document: &str) -> Result<Self, RateCardError> {
        let parsed: RateCardDocument =
            toml::from_str(document).map_err(|e| RateCardError::Parse(e.to_string()))?;

        let card = Self {
            economy: parsed.tiers.economy,
            ground: parsed.tiers.ground,
            priority: parsed.tiers.priority,
        };
        for tier in ServiceTier::ALL {
            card.table(tier).validate(tier)?;
        }
        Ok(card)
    }

    /// Reads, parses and validates a rate card file.
    ///
    /// # Errors
    ///
    /// Returns `RateCardError::Io` if the file cannot be read, otherwise as
    /// [`RateCard::from_toml_str`].
    pub fn from_path(path: &Path) -> Result<Self, RateCardError> {
        let document = std::fs::read_to_string(path).map_err(|e| RateCardError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&document)
    }

    /// Returns the table for a tier.
    #[must_use]
    pub fn table(&self, tier: ServiceTier) -> &RateTable {
        match tier {
            ServiceTier::Economy => &self.economy,
            ServiceTier::Ground => &self.ground,
            ServiceTier::Priority => &self.priority,
        }
    }

    /// Looks up the base rate for a weight in (possibly fractional) pounds.
    ///
    /// The weight is rounded up to the next whole pound and floored at 1.
    #[must_use]
    pub fn lookup_base_rate(&self, tier: ServiceTier, zone: Zone, weight_lb: Decimal) -> Rate {
        let pounds = weight_lb.max(Decimal::ONE).ceil().to_u32().unwrap_or(u32::MAX);
        self.table(tier).base_rate(zone, pounds)
    }

    /// Evaluates the size surcharge for a tier.
    #[must_use]
    pub fn compute_size_surcharge(&self, tier: ServiceTier, dimensions: &Dimensions) -> SizeAssessment {
        self.table(tier).size_surcharge(dimensions)
    }

    /// Prices a package locally: base rate plus size surcharge.
    #[must_use]
    pub fn price(
        &self,
        tier: ServiceTier,
        zone: Zone,
        weight: Weight,
        dimensions: &Dimensions,
    ) -> RateBreakdown {
        let table = self.table(tier);
        let base = table.base_rate(zone, weight.billable_pounds());
        let size = table.size_surcharge(dimensions);
        let total = base
            .checked_add(size.surcharge)
            .unwrap_or_else(|_| Rate::clamped(Decimal::MAX));

        tracing::debug!(
            %tier,
            %zone,
            pounds = weight.billable_pounds(),
            %base,
            surcharge = %size.surcharge,
            size_class = %size.class,
            oversize = size.oversize,
            dim_weight_lb = size.dimensional_weight_lb,
            "local rate priced"
        );

        RateBreakdown { base, size, total }
    }
}

/// Local price with its components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBreakdown {
    /// Tabulated or extrapolated base rate.
    pub base: Rate,
    /// Size evaluation and surcharge.
    pub size: SizeAssessment,
    /// `base + size.surcharge`.
    pub total: Rate,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn card() -> RateCard {
        RateCard::embedded().unwrap()
    }

    fn zone(n: u8) -> Zone {
        Zone::new(n).unwrap()
    }

    fn dec(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    mod loading {
        use super::*;

        #[test]
        fn embedded_card_loads() {
            let card = card();
            assert_eq!(card.table(ServiceTier::Ground).service_name(), "Ground Advantage");
            assert_eq!(card.table(ServiceTier::Economy).transit_estimate(), "5-8 business days");
            assert_eq!(card.table(ServiceTier::Priority).service_name(), "Priority Mail");
        }

        #[test]
        fn malformed_toml_is_parse_error() {
            assert!(matches!(
                RateCard::from_toml_str("tiers = ["),
                Err(RateCardError::Parse(_))
            ));
        }

        #[test]
        fn missing_tier_is_parse_error() {
            let doc = EMBEDDED_RATE_CARD.replace("[tiers.priority]", "[tiers.express]");
            assert!(matches!(
                RateCard::from_toml_str(&doc),
                Err(RateCardError::Parse(_))
            ));
        }

        #[test]
        fn short_row_is_parse_error() {
            let doc = EMBEDDED_RATE_CARD.replacen(
                r#"["4.75", "5.30", "5.85", "6.40", "6.95", "7.50", "8.05", "8.60"],"#,
                r#"["4.75", "5.30"],"#,
                1,
            );
            assert!(matches!(
                RateCard::from_toml_str(&doc),
                Err(RateCardError::Parse(_))
            ));
        }

        #[test]
        fn negative_amount_rejected() {
            let doc = EMBEDDED_RATE_CARD.replacen(
                r#"large_package_surcharge = "15.00""#,
                r#"large_package_surcharge = "-15.00""#,
                1,
            );
            assert!(matches!(
                RateCard::from_toml_str(&doc),
                Err(RateCardError::NegativeAmount {
                    tier: ServiceTier::Ground,
                    ..
                })
            ));
        }

        #[test]
        fn farther_cheaper_rejected() {
            let doc = EMBEDDED_RATE_CARD.replacen(
                r#"["4.75", "5.30", "5.85""#,
                r#"["4.75", "4.00", "5.85""#,
                1,
            );
            assert!(matches!(
                RateCard::from_toml_str(&doc),
                Err(RateCardError::NotMonotonic {
                    tier: ServiceTier::Ground,
                    ..
                })
            ));
        }

        #[test]
        fn missing_file_is_io_error() {
            let result = RateCard::from_path(Path::new("/nonexistent/rates.toml"));
            assert!(matches!(result, Err(RateCardError::Io { .. })));
        }
    }

    mod base_rate {
        use super::*;

        #[test]
        fn fractional_weight_rounds_up() {
            let card = card();
            let one = card.lookup_base_rate(ServiceTier::Ground, zone(1), dec(100));
            let just_over = card.lookup_base_rate(ServiceTier::Ground, zone(1), dec(101));
            assert_eq!(one.amount(), dec(475));
            assert_eq!(just_over.amount(), dec(535));
        }

        #[test]
        fn zero_weight_floors_at_one_pound() {
            let rate = card().lookup_base_rate(ServiceTier::Ground, zone(3), Decimal::ZERO);
            assert_eq!(rate.amount(), dec(585));
        }

        #[test]
        fn ten_pounds_is_last_row() {
            let rate = card().lookup_base_rate(ServiceTier::Ground, zone(8), Decimal::from(10));
            assert_eq!(rate.amount(), dec(1967));
        }

        #[test]
        fn extrapolates_beyond_ten_pounds() {
            // 10 lb zone 8 = 19.67, plus 5 * 1.23.
            let rate = card().lookup_base_rate(ServiceTier::Ground, zone(8), Decimal::from(15));
            assert_eq!(rate.amount(), dec(2582));
        }

        #[test]
        fn economy_shares_first_two_zones() {
            let card = card();
            for pounds in 1..=MAX_TABLE_POUNDS {
                assert_eq!(
                    card.table(ServiceTier::Economy).base_rate(zone(1), pounds),
                    card.table(ServiceTier::Economy).base_rate(zone(2), pounds)
                );
            }
        }

        #[test]
        fn tiers_are_ordered_by_price() {
            let card = card();
            for z in Zone::all() {
                let economy = card.table(ServiceTier::Economy).base_rate(z, 3);
                let ground = card.table(ServiceTier::Ground).base_rate(z, 3);
                let priority = card.table(ServiceTier::Priority).base_rate(z, 3);
                assert!(economy <= ground && ground < priority, "zone {z}");
            }
        }
    }

    mod size_surcharge {
        use super::*;

        fn dims(s: &str) -> Dimensions {
            Dimensions::parse(s).unwrap()
        }

        #[test]
        fn small_package_has_no_surcharge() {
            let assessment = card().compute_size_surcharge(ServiceTier::Ground, &dims("7.5x5.0x0.8"));
            assert_eq!(assessment.class, SizeClass::Standard);
            assert!(!assessment.oversize);
            assert!(assessment.surcharge.is_zero());
        }

        #[test]
        fn medium_volume_ground_only() {
            // 10 x 10 x 10 = 1000 cubic inches.
            let card = card();
            let ground = card.compute_size_surcharge(ServiceTier::Ground, &dims("10x10x10"));
            assert_eq!(ground.class, SizeClass::Medium);
            assert_eq!(ground.surcharge.amount(), dec(400));

            let economy = card.compute_size_surcharge(ServiceTier::Economy, &dims("10x10x10"));
            assert_eq!(economy.class, SizeClass::Medium);
            assert!(economy.surcharge.is_zero());
        }

        #[test]
        fn large_by_volume() {
            // 13 x 12 x 12 = 1872 cubic inches.
            let assessment = card().compute_size_surcharge(ServiceTier::Ground, &dims("13x12x12"));
            assert_eq!(assessment.class, SizeClass::Large);
            assert_eq!(assessment.surcharge.amount(), dec(1500));
        }

        #[test]
        fn large_by_length() {
            let assessment = card().compute_size_surcharge(ServiceTier::Ground, &dims("24x4x4"));
            assert_eq!(assessment.class, SizeClass::Large);
            assert!(!assessment.oversize);
            assert_eq!(assessment.surcharge.amount(), dec(1500));
        }

        #[test]
        fn oversize_by_length_is_additive() {
            let assessment = card().compute_size_surcharge(ServiceTier::Economy, &dims("32x4x4"));
            assert_eq!(assessment.class, SizeClass::Large);
            assert!(assessment.oversize);
            assert_eq!(assessment.surcharge.amount(), dec(4200));
        }

        #[test]
        fn thirty_by_twenty_five_by_twenty_gets_both() {
            let assessment = card().compute_size_surcharge(ServiceTier::Ground, &dims("30x25x20"));
            assert_eq!(assessment.volume, 15000.0);
            assert_eq!(assessment.max_dimension, 30.0);
            assert_eq!(assessment.class, SizeClass::Large);
            assert!(assessment.oversize);
            assert_eq!(assessment.surcharge.amount(), dec(4500));
        }

        #[test]
        fn cube_under_thirty_inches_is_large_only() {
            // 22 x 22 x 22: large by volume, longest side well under 30.
            let assessment = card().compute_size_surcharge(ServiceTier::Ground, &dims("22x22x22"));
            assert_eq!(assessment.class, SizeClass::Large);
            assert!(!assessment.oversize);
            assert_eq!(assessment.surcharge.amount(), dec(1500));

            let long_box = card().compute_size_surcharge(ServiceTier::Ground, &dims("28x22x20"));
            assert!(!long_box.oversize);
            assert_eq!(long_box.surcharge.amount(), dec(1500));
        }

        #[test]
        fn dimensional_weight_is_reported_only() {
            let card = card();
            let heavy_box = dims("20x20x20");
            let breakdown = card.price(ServiceTier::Ground, zone(1), Weight::default(), &heavy_box);
            assert!(breakdown.size.dimensional_weight_lb > 48.0);
            assert_eq!(breakdown.base.amount(), dec(475));
        }
    }

    #[test]
    fn price_sums_base_and_surcharge() {
        let card = card();
        let breakdown = card.price(
            ServiceTier::Ground,
            zone(8),
            Weight::from_ounces(40.0).unwrap(),
            &Dimensions::parse("30x25x20").unwrap(),
        );
        // 3 lb zone 8 = 11.06, + 15.00 large + 30.00 oversize.
        assert_eq!(breakdown.base.amount(), dec(1106));
        assert_eq!(breakdown.total.amount(), dec(5606));
    }
}
