//! # Domain Services
//!
//! Pricing logic that doesn't naturally belong to a single value object.
//!
//! ## Services
//!
//! - [`geo`]: postal-code distance estimation
//! - [`zoning`]: distance to pricing-zone classification
//! - [`rate_table`]: tabulated base rates and size surcharges
//! - [`local_estimator::LocalEstimator`]: complete offline quotes

pub mod geo;
pub mod local_estimator;
pub mod rate_table;
pub mod zoning;

pub use local_estimator::{LocalEstimate, LocalEstimator};
pub use rate_table::{RateBreakdown, RateCard, RateCardError, RateTable, SizeAssessment, SizeClass};
