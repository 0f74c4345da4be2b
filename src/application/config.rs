//! # Engine Configuration
//!
//! Immutable settings for a [`ShippingRateEngine`](super::services::ShippingRateEngine).
//!
//! Settings are layered: defaults, then an optional TOML/JSON/YAML file, then
//! `SHIPQUOTE_*` environment variables (a `.env` file is loaded first).
//!
//! | Key | Default |
//! |---|---|
//! | `origin_postal_code` | `90210` |
//! | `consumer_key` / `consumer_secret` | empty (estimation only) |
//! | `api_base_url` | `https://apis.usps.com` |
//! | `timeout_ms` | `30000` |
//! | `default_tier` | `GROUND` |
//! | `expose_priority` | `false` |
//! | `rate_card_path` | embedded card |
//!
//! # Examples
//!
//! ```
//! use shipquote::application::config::EngineConfig;
//! use shipquote::domain::value_objects::ServiceTier;
//!
//! let config = EngineConfig::default()
//!     .with_credentials("key", "secret")
//!     .with_expose_priority(true);
//!
//! assert!(config.has_credentials());
//! assert_eq!(config.offered_tiers().last(), Some(&ServiceTier::Priority));
//! ```

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::services::rate_table::RateCard;
use crate::domain::value_objects::{PostalCode, ServiceTier};
use crate::infrastructure::carrier::auth::CredentialState;
use crate::infrastructure::carrier::http_client::DEFAULT_TIMEOUT_MS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "SHIPQUOTE";

/// Default ship-from postal code.
pub const DEFAULT_ORIGIN: &str = "90210";

/// Default carrier API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://apis.usps.com";

/// Engine settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    origin_postal_code: PostalCode,
    consumer_key: String,
    #[serde(skip_serializing)]
    consumer_secret: String,
    api_base_url: String,
    timeout_ms: u64,
    default_tier: ServiceTier,
    expose_priority: bool,
    rate_card_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            origin_postal_code: default_origin(),
            consumer_key: String::new(),
            consumer_secret: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            default_tier: ServiceTier::Ground,
            expose_priority: false,
            rate_card_path: None,
        }
    }
}

fn default_origin() -> PostalCode {
    PostalCode::from_static(DEFAULT_ORIGIN)
}

impl EngineConfig {
    /// Loads settings from an optional file and the environment.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the file cannot be read,
    /// a value has the wrong type or [`EngineConfig::validate`] fails.
    pub fn load(path: Option<&Path>) -> ApplicationResult<Self> {
        if let Ok(env_file) = dotenvy::dotenv() {
            tracing::debug!(path = %env_file.display(), "loaded .env");
        }

        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let config: Self = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Checks values that serde cannot.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` for a zero timeout or a
    /// non-HTTP base URL.
    pub fn validate(&self) -> ApplicationResult<()> {
        if self.timeout_ms == 0 {
            return Err(ApplicationError::configuration("timeout_ms must be positive"));
        }
        if !(self.api_base_url.starts_with("https://") || self.api_base_url.starts_with("http://")) {
            return Err(ApplicationError::configuration(format!(
                "api_base_url must be an http(s) URL, got {:?}",
                self.api_base_url
            )));
        }
        Ok(())
    }

    /// Loads the configured rate card, or the embedded one.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::RateCard` if the card cannot be loaded.
    pub fn rate_card(&self) -> ApplicationResult<RateCard> {
        let card = match &self.rate_card_path {
            Some(path) => RateCard::from_path(path)?,
            None => RateCard::embedded()?,
        };
        Ok(card)
    }

    /// Sets the ship-from postal code.
    #[must_use]
    pub fn with_origin(mut self, origin: PostalCode) -> Self {
        self.origin_postal_code = origin;
        self
    }

    /// Sets the carrier consumer key and secret.
    #[must_use]
    pub fn with_credentials(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.consumer_key = key.into();
        self.consumer_secret = secret.into();
        self
    }

    /// Sets the carrier API base URL.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Sets the carrier request timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets the tier priced by the single-quote entry point.
    #[must_use]
    pub fn with_default_tier(mut self, tier: ServiceTier) -> Self {
        self.default_tier = tier;
        self
    }

    /// Offers Priority in option lists.
    #[must_use]
    pub fn with_expose_priority(mut self, expose: bool) -> Self {
        self.expose_priority = expose;
        self
    }

    /// Loads rate tables from a file instead of the embedded card.
    #[must_use]
    pub fn with_rate_card_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.rate_card_path = Some(path.into());
        self
    }

    /// Returns the ship-from postal code.
    #[inline]
    #[must_use]
    pub fn origin_postal_code(&self) -> &PostalCode {
        &self.origin_postal_code
    }

    /// Returns the carrier API base URL.
    #[inline]
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Returns the carrier request timeout.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Returns the tier priced by the single-quote entry point.
    #[inline]
    #[must_use]
    pub fn default_tier(&self) -> ServiceTier {
        self.default_tier
    }

    /// Returns true if Priority is offered.
    #[inline]
    #[must_use]
    pub fn expose_priority(&self) -> bool {
        self.expose_priority
    }

    /// Returns the custom rate card path, if any.
    #[inline]
    #[must_use]
    pub fn rate_card_path(&self) -> Option<&Path> {
        self.rate_card_path.as_deref()
    }

    /// Returns true if both consumer key and secret are set.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.credentials().is_configured()
    }

    /// Returns a fresh credential state with no token.
    #[must_use]
    pub fn credentials(&self) -> CredentialState {
        CredentialState::new(self.consumer_key.trim(), self.consumer_secret.trim())
    }

    /// Returns the tiers listed for calculated products, cheapest first.
    #[must_use]
    pub fn offered_tiers(&self) -> Vec<ServiceTier> {
        let mut tiers = ServiceTier::OFFERED.to_vec();
        if self.expose_priority {
            tiers.push(ServiceTier::Priority);
        }
        tiers
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("origin_postal_code", &self.origin_postal_code)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[redacted]")
            .field("api_base_url", &self.api_base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("default_tier", &self.default_tier)
            .field("expose_priority", &self.expose_priority)
            .field("rate_card_path", &self.rate_card_path)
            .finish()
    }
}
