//! Identifier provider abstractions and implementations.
//!
//! This module contains:
//! - The `IdentifierProvider` trait that all providers implement
//! - Provider rate limiting configuration and a token bucket throttle
//! - The OpenFIGI mapping provider
//!
//! Providers receive already-normalized identifiers (`Cusip`). Caching of
//! results is the caller's concern.

mod capabilities;
mod rate_limiter;
mod traits;

pub mod openfigi;

pub use capabilities::RateLimit;
pub use rate_limiter::RateLimiter;
pub use traits::IdentifierProvider;
