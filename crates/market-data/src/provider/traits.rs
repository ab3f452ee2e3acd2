//! Identifier provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{Cusip, IdentifierMapping};

use super::capabilities::RateLimit;

/// Trait for identifier-mapping providers.
///
/// A provider turns a security identifier into an instrument record carrying
/// the issuer name. Implementations must be cheap to share (`Send + Sync`) so
/// one instance can serve concurrent report requests.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use aurum_market_data::provider::{IdentifierProvider, RateLimit};
///
/// struct StaticProvider;
///
/// #[async_trait]
/// impl IdentifierProvider for StaticProvider {
///     fn id(&self) -> &'static str {
///         "STATIC"
///     }
///
///     fn rate_limit(&self) -> RateLimit {
///         RateLimit::default()
///     }
///
///     async fn lookup_cusip(&self, cusip: &Cusip) -> Result<IdentifierMapping, MarketDataError> {
///         Err(MarketDataError::IdentifierNotFound(cusip.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait IdentifierProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "OPENFIGI".
    fn id(&self) -> &'static str;

    /// Rate limiting configuration.
    fn rate_limit(&self) -> RateLimit;

    /// Map a CUSIP to an instrument record.
    ///
    /// Returns `IdentifierNotFound` when the provider answered without a match.
    async fn lookup_cusip(&self, cusip: &Cusip) -> Result<IdentifierMapping, MarketDataError>;
}
