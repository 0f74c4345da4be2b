//! # Local Estimator
//!
//! Offline pricing: zone classification plus the rate card.
//!
//! Every quote produced here is tagged [`DataSource::Estimated`].
//!
//! # Examples
//!
//! ```
//! use shipquote::domain::services::local_estimator::LocalEstimator;
//! use shipquote::domain::services::rate_table::RateCard;
//! use shipquote::domain::value_objects::{Dimensions, ServiceTier, Weight};
//! use std::sync::Arc;
//!
//! let card = Arc::new(RateCard::embedded().unwrap());
//! let estimator = LocalEstimator::new(card, "90210".parse().unwrap());
//! let quote = estimator
//!     .estimate(
//!         ServiceTier::Ground,
//!         Weight::default(),
//!         &Dimensions::default(),
//!         &"90211".parse().unwrap(),
//!     )
//!     .into_quote();
//!
//! assert_eq!(quote.rate().to_string(), "$4.75");
//! assert_eq!(quote.zone().get(), 1);
//! ```

use crate::domain::entities::ShippingQuote;
use crate::domain::services::rate_table::{RateBreakdown, RateCard};
use crate::domain::services::zoning::classify_zone;
use crate::domain::value_objects::{DataSource, Dimensions, PostalCode, ServiceTier, Weight, Zone};
use std::sync::Arc;

/// A locally computed price with its inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalEstimate {
    /// Tier priced.
    pub tier: ServiceTier,
    /// Zone used for the lookup.
    pub zone: Zone,
    /// Base rate, size assessment and total.
    pub breakdown: RateBreakdown,
    /// Tier service name.
    pub service_name: String,
    /// Tier transit estimate.
    pub transit_estimate: String,
}

impl LocalEstimate {
    /// Converts the estimate into an `Estimated` quote.
    #[must_use]
    pub fn into_quote(self) -> ShippingQuote {
        ShippingQuote::builder(
            self.breakdown.total,
            self.service_name,
            self.transit_estimate,
            self.zone,
            DataSource::Estimated,
        )
        .tier(self.tier)
        .build()
    }
}

/// Prices packages from a fixed origin without contacting the carrier.
#[derive(Debug, Clone)]
pub struct LocalEstimator {
    rate_card: Arc<RateCard>,
    origin: PostalCode,
}

impl LocalEstimator {
    /// Creates an estimator shipping from `origin`.
    #[must_use]
    pub fn new(rate_card: Arc<RateCard>, origin: PostalCode) -> Self {
        Self { rate_card, origin }
    }

    /// Returns the origin postal code.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> &PostalCode {
        &self.origin
    }

    /// Returns the rate card.
    #[inline]
    #[must_use]
    pub fn rate_card(&self) -> &RateCard {
        &self.rate_card
    }

    /// Classifies the zone from the origin to `destination`.
    #[must_use]
    pub fn zone_to(&self, destination: &PostalCode) -> Zone {
        classify_zone(&self.origin, destination)
    }

    /// Prices a package to `destination`.
    #[must_use]
    pub fn estimate(
        &self,
        tier: ServiceTier,
        weight: Weight,
        dimensions: &Dimensions,
        destination: &PostalCode,
    ) -> LocalEstimate {
        let zone = self.zone_to(destination);
        self.estimate_in_zone(tier, zone, weight, dimensions)
    }

    /// Prices a package for an already classified zone.
    #[must_use]
    pub fn estimate_in_zone(
        &self,
        tier: ServiceTier,
        zone: Zone,
        weight: Weight,
        dimensions: &Dimensions,
    ) -> LocalEstimate {
        let table = self.rate_card.table(tier);
        let breakdown = self.rate_card.price(tier, zone, weight, dimensions);

        LocalEstimate {
            tier,
            zone,
            breakdown,
            service_name: table.service_name().to_string(),
            transit_estimate: table.transit_estimate().to_string(),
        }
    }
}
