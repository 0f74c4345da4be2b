//! # shipquote
//!
//! Shipping rate estimation engine for online-store checkout.
//!
//! Given a package's weight and dimensions, an origin and destination postal
//! code and a service tier, the engine produces a price and a delivery
//! estimate. Prices come from an authenticated carrier rate API when one is
//! configured and reachable, and otherwise from a local estimate built on
//! great-circle distance zoning and tabulated rate data.
//!
//! ## Layers
//!
//! - [`domain`]: value objects, the quote entity and the pure estimation
//!   services (distance, zoning, rate tables, local estimator)
//! - [`infrastructure`]: the carrier REST integration (OAuth token grant and
//!   live rate lookup)
//! - [`application`]: configuration, the rate resolver and the options
//!   aggregator that checkout code calls
//!
//! # Examples
//!
//! ```no_run
//! use shipquote::application::config::EngineConfig;
//! use shipquote::application::services::ShippingRateEngine;
//! use shipquote::domain::value_objects::{PackageSpec, PostalCode, RawPackage};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = ShippingRateEngine::connect(EngineConfig::default()).await?;
//!
//! let package = PackageSpec::from_raw(&RawPackage {
//!     weight: Some("12".to_string()),
//!     dimensions: Some("10x8x4".to_string()),
//!     ..RawPackage::default()
//! });
//! let destination: PostalCode = "10001".parse()?;
//!
//! for quote in engine.list_shipping_options(&package, &destination).await {
//!     println!("{quote}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::config::EngineConfig;
pub use application::error::{ApplicationError, ApplicationResult};
pub use application::services::ShippingRateEngine;
pub use domain::entities::quote::ShippingQuote;
pub use domain::value_objects::{
    DataSource, Dimensions, PackageSpec, PostalCode, Rate, RawPackage, ServiceTier,
    ShippingOption, Weight, Zone,
};
