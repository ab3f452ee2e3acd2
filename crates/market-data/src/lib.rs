//! Aurum Market Data Crate
//!
//! Identifier-mapping providers used to resolve bond issuers from security
//! identifiers.
//!
//! # Overview
//!
//! - [`Cusip`] normalizes raw identifiers before they reach a provider
//! - [`IdentifierProvider`] is the seam the issuer extractor depends on
//! - [`OpenFigiProvider`] maps CUSIPs through the OpenFIGI v3 mapping API
//! - [`MarketDataError`] carries a [`RetryClass`] so callers can tell a
//!   definitive "not found" from a transient failure
//!
//! Caching is left to callers; providers always hit the network.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::{MarketDataError, RetryClass};
pub use models::{Cusip, IdentifierMapping, CUSIP_LENGTH};
pub use provider::openfigi::{clean_issuer_name, OpenFigiConfig, OpenFigiProvider};
pub use provider::{IdentifierProvider, RateLimit, RateLimiter};
