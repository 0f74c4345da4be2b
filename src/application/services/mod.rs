//! # Application Services
//!
//! Services that orchestrate domain logic and the carrier integration.
//!
//! - [`ShippingRateEngine`]: single quotes with live-then-local resolution
//! - [`options`]: the per-tier option list for checkout

pub mod options;
pub mod rate_resolver;

pub use rate_resolver::{
    AUTH_FAILED_WARNING, LIVE_FAILED_WARNING, NOT_CONFIGURED_WARNING, ShippingRateEngine,
};
