//! # Application Layer
//!
//! Configuration, error types and the services checkout code calls.

pub mod config;
pub mod error;
pub mod services;

pub use config::EngineConfig;
pub use error::{ApplicationError, ApplicationResult};
pub use services::ShippingRateEngine;
