//! # Domain Entities
//!
//! - [`ShippingQuote`]: price and delivery estimate for one service level

pub mod quote;

pub use quote::{ShippingQuote, ShippingQuoteBuilder};
