//! # Shipping Quote Entity
//!
//! A price and delivery estimate for one service level.
//!
//! Quotes are created fresh for every request and never mutated afterwards;
//! attaching a warning consumes the quote and returns a new one.
//!
//! # Examples
//!
//! ```
//! use shipquote::domain::entities::quote::ShippingQuote;
//! use shipquote::domain::value_objects::{DataSource, Rate, ServiceTier, Zone};
//! use rust_decimal::Decimal;
//!
//! let quote = ShippingQuote::builder(
//!     Rate::new(Decimal::new(845, 2)).unwrap(),
//!     "Ground Advantage",
//!     "2-5 business days",
//!     Zone::new(4).unwrap(),
//!     DataSource::Live,
//! )
//! .tier(ServiceTier::Ground)
//! .build();
//!
//! assert!(quote.is_live());
//! assert!(quote.warnings().is_empty());
//! ```

use crate::domain::value_objects::{DataSource, Rate, ServiceTier, Zone};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Service name shown for free-shipping products.
pub const FREE_SHIPPING_SERVICE: &str = "Free Shipping";

/// Service name shown for flat-rate products.
pub const FLAT_RATE_SERVICE: &str = "Flat Rate Shipping";

/// Transit estimate for quotes that bypass carrier rating.
pub const STANDARD_TRANSIT: &str = "3-7 business days";

/// A shipping quote presented to the shopper.
///
/// # Invariants
///
/// - `rate` is never negative (enforced by [`Rate`])
/// - `zone` is always within 1..=8 (enforced by [`Zone`])
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingQuote {
    /// The shipping charge.
    rate: Rate,
    /// Human-readable service name.
    service_name: String,
    /// Delivery estimate, e.g. "2-5 business days".
    transit_estimate: String,
    /// Pricing zone.
    zone: Zone,
    /// Where the price came from.
    data_source: DataSource,
    /// Service tier, absent for free and flat-rate quotes.
    tier: Option<ServiceTier>,
    /// Notes for the shopper or operator, e.g. degraded-mode notices.
    warnings: Vec<String>,
    /// When the quote was produced.
    quoted_at: DateTime<Utc>,
}

impl ShippingQuote {
    /// Returns a builder for constructing a quote.
    #[must_use]
    pub fn builder(
        rate: Rate,
        service_name: impl Into<String>,
        transit_estimate: impl Into<String>,
        zone: Zone,
        data_source: DataSource,
    ) -> ShippingQuoteBuilder {
        ShippingQuoteBuilder::new(rate, service_name, transit_estimate, zone, data_source)
    }

    /// Creates the zero-cost quote for free-shipping products.
    #[must_use]
    pub fn free_shipping() -> Self {
        Self::builder(
            Rate::ZERO,
            FREE_SHIPPING_SERVICE,
            STANDARD_TRANSIT,
            Zone::MIN,
            DataSource::Estimated,
        )
        .build()
    }

    /// Creates a quote at a product's flat rate.
    #[must_use]
    pub fn flat_rate(rate: Rate) -> Self {
        Self::builder(
            rate,
            FLAT_RATE_SERVICE,
            STANDARD_TRANSIT,
            Zone::MIN,
            DataSource::Estimated,
        )
        .build()
    }

    /// Returns the shipping charge.
    #[inline]
    #[must_use]
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Returns the service name.
    #[inline]
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Returns the transit estimate.
    #[inline]
    #[must_use]
    pub fn transit_estimate(&self) -> &str {
        &self.transit_estimate
    }

    /// Returns the pricing zone.
    #[inline]
    #[must_use]
    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Returns where the price came from.
    #[inline]
    #[must_use]
    pub fn data_source(&self) -> DataSource {
        self.data_source
    }

    /// Returns the service tier, if this is a rated quote.
    #[inline]
    #[must_use]
    pub fn tier(&self) -> Option<ServiceTier> {
        self.tier
    }

    /// Returns the attached warnings.
    #[inline]
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Returns when the quote was produced.
    #[inline]
    #[must_use]
    pub fn quoted_at(&self) -> DateTime<Utc> {
        self.quoted_at
    }

    /// Returns true if the price came from the carrier.
    #[inline]
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.data_source.is_live()
    }

    /// Returns this quote with one more warning attached.
    #[must_use]
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

impl fmt::Display for ShippingQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}, zone {}, {})",
            self.service_name, self.rate, self.transit_estimate, self.zone, self.data_source
        )
    }
}

/// Builder for constructing [`ShippingQuote`] instances.
#[derive(Debug, Clone)]
pub struct ShippingQuoteBuilder {
    rate: Rate,
    service_name: String,
    transit_estimate: String,
    zone: Zone,
    data_source: DataSource,
    tier: Option<ServiceTier>,
    warnings: Vec<String>,
}

impl ShippingQuoteBuilder {
    /// Creates a new builder with required fields.
    #[must_use]
    pub fn new(
        rate: Rate,
        service_name: impl Into<String>,
        transit_estimate: impl Into<String>,
        zone: Zone,
        data_source: DataSource,
    ) -> Self {
        Self {
            rate,
            service_name: service_name.into(),
            transit_estimate: transit_estimate.into(),
            zone,
            data_source,
            tier: None,
            warnings: Vec::new(),
        }
    }

    /// Sets the service tier.
    #[must_use]
    pub fn tier(mut self, tier: ServiceTier) -> Self {
        self.tier = Some(tier);
        self
    }

    /// Builds the quote.
    #[must_use]
    pub fn build(self) -> ShippingQuote {
        ShippingQuote {
            rate: self.rate,
            service_name: self.service_name,
            transit_estimate: self.transit_estimate,
            zone: self.zone,
            data_source: self.data_source,
            tier: self.tier,
            warnings: self.warnings,
            quoted_at: Utc::now(),
        }
    }
}
