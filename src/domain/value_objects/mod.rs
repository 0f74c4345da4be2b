//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Package
//!
//! - [`Weight`], [`Dimensions`]: physical attributes with lenient parsing
//! - [`PackageSpec`]: typed package record built from [`RawPackage`]
//!
//! ## Rating
//!
//! - [`PostalCode`]: 5-digit or ZIP+4 code
//! - [`Zone`]: pricing zone 1-8
//! - [`Rate`]: non-negative currency amount
//!
//! ## Domain Enums
//!
//! - `ServiceTier`: Economy, Ground, Priority
//! - `ShippingOption`: calculated, free, flat
//! - `DataSource`: Live or Estimated

pub mod arithmetic;
pub mod enums;
pub mod package;
pub mod postal_code;
pub mod rate;
pub mod zone;

pub use arithmetic::{ArithmeticError, ArithmeticResult, CheckedArithmetic, Rounding, div_round};
pub use enums::{DataSource, ParseEnumError, ServiceTier, ShippingOption};
pub use package::{Dimensions, PackageSpec, RawPackage, Weight};
pub use postal_code::PostalCode;
pub use rate::Rate;
pub use zone::Zone;
