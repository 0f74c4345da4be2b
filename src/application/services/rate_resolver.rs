//! # Rate Resolver
//!
//! Checkout-facing entry point producing one quote per request.
//!
//! # Resolution
//!
//! ```text
//! free        -> $0.00 "Free Shipping"
//! flat        -> product flat rate ($5.00 when unset)
//! calculated  -> token held?  live quote, local on failure
//!                no creds?    local + configuration warning
//!                token failed local + authentication warning
//! ```
//!
//! Quoting never fails. Every carrier problem downgrades to a local estimate
//! with a warning attached to the quote.

use crate::application::config::EngineConfig;
use crate::application::error::ApplicationResult;
use crate::domain::entities::ShippingQuote;
use crate::domain::services::local_estimator::LocalEstimator;
use crate::domain::services::rate_table::RateCard;
use crate::domain::value_objects::{
    DataSource, PackageSpec, PostalCode, ServiceTier, ShippingOption, Zone,
};
use crate::infrastructure::carrier::auth::{CredentialManager, CredentialState};
use crate::infrastructure::carrier::http_client::HttpClient;
use crate::infrastructure::carrier::rates::CarrierRateClient;
use crate::infrastructure::carrier::traits::{LiveRateRequest, LiveRateSource, TokenSource};
use chrono::Utc;
use std::sync::Arc;

/// Warning attached when no carrier credentials are configured.
pub const NOT_CONFIGURED_WARNING: &str =
    "Carrier credentials are not configured; showing estimated rates.";

/// Warning attached when the carrier rejected or could not issue a token.
pub const AUTH_FAILED_WARNING: &str =
    "Carrier authentication failed; showing estimated rates.";

/// Warning attached when a live rate request failed.
pub const LIVE_FAILED_WARNING: &str =
    "Live carrier rate unavailable; showing estimated rate.";

enum LiveStatus<'a> {
    Ready {
        source: &'a dyn LiveRateSource,
        token: &'a str,
    },
    NotConfigured,
    NoToken,
}

/// Shipping rate engine.
///
/// Immutable after construction; share by reference across requests.
#[derive(Debug, Clone)]
pub struct ShippingRateEngine {
    config: EngineConfig,
    estimator: LocalEstimator,
    credentials: CredentialState,
    live: Option<Arc<dyn LiveRateSource>>,
}

impl ShippingRateEngine {
    /// Builds an engine from configuration, acquiring a carrier token when
    /// credentials are present.
    ///
    /// A failed token request does not fail construction; the engine then
    /// runs in estimation mode.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError` if the configuration is invalid, the rate
    /// card cannot be loaded or the HTTP client cannot be built.
    pub async fn connect(config: EngineConfig) -> ApplicationResult<Self> {
        config.validate()?;
        let rate_card = Arc::new(config.rate_card()?);
        let http = HttpClient::new(config.timeout_ms())?;
        let tokens = CredentialManager::new(http.clone(), config.api_base_url());
        let live = CarrierRateClient::new(http, config.api_base_url());

        Ok(Self::with_carrier(config, rate_card, &tokens, Arc::new(live)).await)
    }

    /// Builds an engine from explicit carrier ports.
    pub async fn with_carrier(
        config: EngineConfig,
        rate_card: Arc<RateCard>,
        tokens: &dyn TokenSource,
        live: Arc<dyn LiveRateSource>,
    ) -> Self {
        let credentials = config.credentials();
        let credentials = if credentials.is_configured() {
            tokens.acquire_token(credentials).await
        } else {
            tracing::warn!("carrier credentials not configured, estimation mode only");
            credentials
        };

        Self::from_parts(config, rate_card, credentials, Some(live))
    }

    /// Builds an engine that never contacts the carrier.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError` if the configuration is invalid or the
    /// rate card cannot be loaded.
    pub fn offline(config: EngineConfig) -> ApplicationResult<Self> {
        config.validate()?;
        let rate_card = Arc::new(config.rate_card()?);
        Ok(Self::from_parts(
            config,
            rate_card,
            CredentialState::unconfigured(),
            None,
        ))
    }

    /// Assembles an engine from already-built parts.
    #[must_use]
    pub fn from_parts(
        config: EngineConfig,
        rate_card: Arc<RateCard>,
        credentials: CredentialState,
        live: Option<Arc<dyn LiveRateSource>>,
    ) -> Self {
        let estimator = LocalEstimator::new(rate_card, config.origin_postal_code().clone());
        tracing::info!(
            origin = %config.origin_postal_code(),
            live = credentials.access_token().is_some() && live.is_some(),
            "shipping rate engine ready"
        );
        Self {
            config,
            estimator,
            credentials,
            live,
        }
    }

    /// Returns the configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the credential state, including any token failure reason.
    #[inline]
    #[must_use]
    pub fn credentials(&self) -> &CredentialState {
        &self.credentials
    }

    /// Returns the local estimator.
    #[inline]
    #[must_use]
    pub fn estimator(&self) -> &LocalEstimator {
        &self.estimator
    }

    /// Returns true if calculated quotes will try the carrier first.
    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self.live_status(), LiveStatus::Ready { .. })
    }

    /// Quotes a package in the configured default tier.
    pub async fn compute_shipping_quote(
        &self,
        package: &PackageSpec,
        destination: &PostalCode,
    ) -> ShippingQuote {
        self.quote_tier(package, destination, self.config.default_tier())
            .await
    }

    /// Quotes a package in a specific tier.
    ///
    /// Free and flat-rate packages ignore the tier.
    pub async fn quote_tier(
        &self,
        package: &PackageSpec,
        destination: &PostalCode,
        tier: ServiceTier,
    ) -> ShippingQuote {
        match package.shipping_option() {
            ShippingOption::Free => ShippingQuote::free_shipping(),
            ShippingOption::Flat => ShippingQuote::flat_rate(package.flat_rate_or_default()),
            ShippingOption::Calculated => self.quote_calculated(package, destination, tier).await,
        }
    }

    async fn quote_calculated(
        &self,
        package: &PackageSpec,
        destination: &PostalCode,
        tier: ServiceTier,
    ) -> ShippingQuote {
        let zone = self.estimator.zone_to(destination);

        let (source, token) = match self.live_status() {
            LiveStatus::Ready { source, token } => (source, token),
            LiveStatus::NotConfigured => {
                return self
                    .local_quote(package, tier, zone)
                    .with_warning(NOT_CONFIGURED_WARNING);
            }
            LiveStatus::NoToken => {
                return self
                    .local_quote(package, tier, zone)
                    .with_warning(AUTH_FAILED_WARNING);
            }
        };

        let request = LiveRateRequest {
            weight: package.weight(),
            dimensions: package.dimensions(),
            origin: self.estimator.origin().clone(),
            destination: destination.clone(),
            tier,
            mailing_date: Utc::now().date_naive(),
        };

        match source.quote_live(&request, token).await {
            Ok(live) => {
                let table = self.estimator.rate_card().table(tier);
                let quote = ShippingQuote::builder(
                    live.rate,
                    table.service_name(),
                    table.transit_estimate(),
                    live.zone.unwrap_or(zone),
                    DataSource::Live,
                )
                .tier(tier)
                .build();
                tracing::debug!(%tier, zone = %quote.zone(), rate = %quote.rate(), "live quote");
                quote
            }
            Err(e) => {
                tracing::warn!(%tier, error = %e, "live rate failed, falling back to estimate");
                self.local_quote(package, tier, zone)
                    .with_warning(LIVE_FAILED_WARNING)
            }
        }
    }

    fn local_quote(&self, package: &PackageSpec, tier: ServiceTier, zone: Zone) -> ShippingQuote {
        let quote = self
            .estimator
            .estimate_in_zone(tier, zone, package.weight(), &package.dimensions())
            .into_quote();
        tracing::info!(
            %tier,
            %zone,
            rate = %quote.rate(),
            data_source = %quote.data_source(),
            "estimated quote"
        );
        quote
    }

    fn live_status(&self) -> LiveStatus<'_> {
        if !self.credentials.is_configured() {
            return LiveStatus::NotConfigured;
        }
        match (self.live.as_deref(), self.credentials.access_token()) {
            (Some(source), Some(token)) => LiveStatus::Ready { source, token },
            (None, _) => LiveStatus::NotConfigured,
            (Some(_), None) => LiveStatus::NoToken,
        }
    }
}
