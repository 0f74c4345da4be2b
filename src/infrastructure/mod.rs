//! # Infrastructure Layer
//!
//! Adapters for external systems.
//!
//! - [`carrier`]: carrier OAuth and live rate API

pub mod carrier;
