//! # Domain Layer
//!
//! Shipping domain model and pure estimation logic.
//!
//! Nothing in this layer performs I/O. The estimation services are
//! deterministic functions of their inputs and the loaded rate card.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
