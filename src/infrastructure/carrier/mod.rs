//! # Carrier Integration
//!
//! Authenticated access to the external carrier rate API.
//!
//! - [`auth`]: OAuth2 client-credentials token acquisition
//! - [`rates`]: live base-rate search
//! - [`traits`]: ports the rate resolver depends on
//! - [`http_client`]: shared reqwest wrapper
//! - [`error`]: carrier error types

pub mod auth;
pub mod error;
pub mod http_client;
pub mod rates;
pub mod traits;

pub use auth::{AuthFailure, CredentialManager, CredentialState};
pub use error::{AuthFailureKind, CarrierError, CarrierResult};
pub use http_client::HttpClient;
pub use rates::CarrierRateClient;
pub use traits::{LiveRate, LiveRateRequest, LiveRateSource, TokenSource};
