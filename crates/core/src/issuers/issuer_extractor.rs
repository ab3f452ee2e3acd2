//! Four-tier bond issuer extraction.
//!
//! 1. Cached lookup by normalized CUSIP (negative results included)
//! 2. Fresh identifier-mapping lookup
//! 3. Bond name patterns
//! 4. The bond name itself
//!
//! Labels are cosmetic grouping keys. Every failure degrades to the next tier,
//! so extraction always yields a non-empty label.

use std::sync::Arc;

use log::{debug, info, warn};

use aurum_market_data::{Cusip, IdentifierProvider, MarketDataError};

use super::issuer_cache::{CachedIssuer, IssuerCache};
use super::issuers_model::{BondHolding, ExtractionMethod, ExtractionStats, IssuerLabel};
use super::name_patterns::IssuerNameParser;
use crate::constants::UNKNOWN_ISSUER;

/// Resolves issuer labels for bonds.
pub struct BondIssuerExtractor {
    provider: Option<Arc<dyn IdentifierProvider>>,
    cache: Arc<IssuerCache>,
    parser: IssuerNameParser,
}

impl BondIssuerExtractor {
    pub fn new(provider: Option<Arc<dyn IdentifierProvider>>) -> Self {
        Self {
            provider,
            cache: Arc::new(IssuerCache::default()),
            parser: IssuerNameParser::default(),
        }
    }

    /// Extractor without network access: tiers 1, 3 and 4 only.
    pub fn offline() -> Self {
        Self::new(None)
    }

    pub fn with_cache(mut self, cache: Arc<IssuerCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_parser(mut self, parser: IssuerNameParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn cache(&self) -> &Arc<IssuerCache> {
        &self.cache
    }

    /// Issuer label and the tier that produced it.
    pub async fn resolve_issuer(&self, cusip: Option<&str>, bond_name: &str) -> IssuerLabel {
        if let Some(cusip) = cusip.and_then(Self::normalize_cusip) {
            match self.cache.get(cusip.as_str()) {
                Some(CachedIssuer::Found(issuer)) => {
                    debug!("Issuer for {} served from cache: {}", cusip, issuer);
                    return IssuerLabel::new(issuer, ExtractionMethod::Cached);
                }
                Some(negative) => {
                    debug!("Cached {:?} for {}, skipping lookup", negative, cusip);
                }
                None => {
                    if let Some(issuer) = self.lookup(&cusip).await {
                        return IssuerLabel::new(issuer, ExtractionMethod::Lookup);
                    }
                }
            }
        }

        self.extract_issuer_offline(bond_name)
    }

    /// Issuer display string. Never empty.
    pub async fn extract_issuer(&self, cusip: Option<&str>, bond_name: &str) -> String {
        self.resolve_issuer(cusip, bond_name).await.issuer
    }

    /// Tiers 3 and 4 only.
    pub fn extract_issuer_offline(&self, bond_name: &str) -> IssuerLabel {
        if let Some(issuer) = self.parser.extract(bond_name) {
            return IssuerLabel::new(issuer, ExtractionMethod::NamePattern);
        }

        let trimmed = bond_name.trim();
        if trimmed.is_empty() {
            warn!("Bond without a name or resolvable issuer");
            IssuerLabel::new(UNKNOWN_ISSUER, ExtractionMethod::FullName)
        } else {
            warn!("Could not extract issuer from bond name: {}", trimmed);
            IssuerLabel::new(trimmed, ExtractionMethod::FullName)
        }
    }

    /// Label a batch of holdings in order and log per-tier counts.
    pub async fn label_holdings(&self, holdings: &[BondHolding]) -> Vec<IssuerLabel> {
        let mut stats = ExtractionStats::default();
        let mut labels = Vec::with_capacity(holdings.len());

        for holding in holdings {
            let label = self
                .resolve_issuer(holding.cusip.as_deref(), &holding.name)
                .await;
            stats.record(label.method);
            labels.push(label);
        }

        info!(
            "Issuer extraction: {} cached, {} looked up, {} from name patterns, {} full names",
            stats.cached, stats.lookup, stats.name_pattern, stats.full_name
        );
        labels
    }

    fn normalize_cusip(raw: &str) -> Option<Cusip> {
        match Cusip::parse(raw) {
            Ok(cusip) => Some(cusip),
            Err(e) => {
                debug!("Skipping identifier lookup: {}", e);
                None
            }
        }
    }

    /// Tier 2. Records the outcome in the cache; returns the issuer on success.
    async fn lookup(&self, cusip: &Cusip) -> Option<String> {
        let provider = self.provider.as_ref()?;

        match provider.lookup_cusip(cusip).await {
            Ok(mapping) if !mapping.name.trim().is_empty() => {
                let issuer = mapping.name.trim().to_string();
                debug!("{} mapped {} to {}", provider.id(), cusip, issuer);
                self.cache
                    .insert(cusip.as_str(), CachedIssuer::Found(issuer.clone()));
                Some(issuer)
            }
            Ok(_) => {
                self.cache.insert(cusip.as_str(), CachedIssuer::NotFound);
                None
            }
            Err(e) => {
                self.cache.insert(cusip.as_str(), Self::negative_entry(&e));
                warn!("Issuer lookup for {} via {} failed: {}", cusip, provider.id(), e);
                None
            }
        }
    }

    fn negative_entry(error: &MarketDataError) -> CachedIssuer {
        if error.retry_class().is_transient() {
            CachedIssuer::LookupFailed
        } else {
            CachedIssuer::NotFound
        }
    }
}
