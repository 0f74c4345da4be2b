//! # Options Aggregator
//!
//! The list of shipping choices shown at checkout.
//!
//! Free and flat-rate products get exactly one option. Calculated products get
//! one quote per offered tier, cheapest tier first: Economy, Ground and, when
//! `expose_priority` is set, Priority.

use crate::application::services::rate_resolver::ShippingRateEngine;
use crate::domain::entities::ShippingQuote;
use crate::domain::value_objects::{PackageSpec, PostalCode, ShippingOption};

impl ShippingRateEngine {
    /// Lists every shipping option for a package.
    ///
    /// Tiers are priced one after another.
    pub async fn list_shipping_options(
        &self,
        package: &PackageSpec,
        destination: &PostalCode,
    ) -> Vec<ShippingQuote> {
        if package.shipping_option() != ShippingOption::Calculated {
            let quote = self
                .quote_tier(package, destination, self.config().default_tier())
                .await;
            return vec![quote];
        }

        let tiers = self.config().offered_tiers();
        let mut quotes = Vec::with_capacity(tiers.len());
        for tier in tiers {
            quotes.push(self.quote_tier(package, destination, tier).await);
        }

        tracing::debug!(
            destination = %destination,
            options = quotes.len(),
            "shipping options listed"
        );
        quotes
    }
}
