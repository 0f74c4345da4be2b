//! # Carrier Ports
//!
//! Port definitions for the carrier integration.
//!
//! The rate resolver depends only on these traits, so tests can substitute
//! scripted token and rate sources for the HTTP implementations.

use crate::domain::value_objects::{Dimensions, PostalCode, Rate, ServiceTier, Weight, Zone};
use crate::infrastructure::carrier::auth::CredentialState;
use crate::infrastructure::carrier::error::CarrierResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameters of a live rate lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveRateRequest {
    /// Package weight.
    pub weight: Weight,
    /// Package dimensions.
    pub dimensions: Dimensions,
    /// Ship-from postal code.
    pub origin: PostalCode,
    /// Ship-to postal code.
    pub destination: PostalCode,
    /// Requested service tier.
    pub tier: ServiceTier,
    /// Date the package will be mailed.
    pub mailing_date: NaiveDate,
}

/// Price returned by the carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveRate {
    /// Carrier base price.
    pub rate: Rate,
    /// Zone reported by the carrier, when present and in range.
    pub zone: Option<Zone>,
}

/// Source of carrier access tokens.
#[async_trait]
pub trait TokenSource: Send + Sync + fmt::Debug {
    /// Exchanges the credentials in `state` for an access token.
    ///
    /// Never fails: the returned state carries either a token or the reason
    /// acquisition failed.
    async fn acquire_token(&self, state: CredentialState) -> CredentialState;
}

/// Source of live carrier prices.
#[async_trait]
pub trait LiveRateSource: Send + Sync + fmt::Debug {
    /// Requests a live price.
    ///
    /// # Errors
    ///
    /// - `CarrierError::Timeout` - Request timed out
    /// - `CarrierError::Authentication` - Token rejected
    /// - `CarrierError::RateUnavailable` - No price in the response
    /// - `CarrierError::ProtocolError` - Malformed response
    async fn quote_live(&self, request: &LiveRateRequest, token: &str) -> CarrierResult<LiveRate>;
}
