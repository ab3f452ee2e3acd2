//! Bond issuer models.

use chrono::Duration;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which tier produced an issuer label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractionMethod {
    /// Tier 1: a previous lookup result still in the cache
    Cached,
    /// Tier 2: a fresh identifier-mapping lookup
    Lookup,
    /// Tier 3: parsed from the bond name
    NamePattern,
    /// Tier 4: the bond name itself
    FullName,
}

/// Display label used to group bonds by issuer. Never used in valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuerLabel {
    pub issuer: String,
    pub method: ExtractionMethod,
}

impl IssuerLabel {
    pub fn new(issuer: impl Into<String>, method: ExtractionMethod) -> Self {
        Self {
            issuer: issuer.into(),
            method,
        }
    }
}

/// A bond position to be grouped by issuer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondHolding {
    pub name: String,
    #[serde(default)]
    pub cusip: Option<String>,
    pub market_value: Decimal,
    /// Nominal quantity held
    pub face_value: Decimal,
    #[serde(default)]
    pub custody: String,
}

/// Holdings aggregated under one issuer label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuerGroup {
    /// 1-based position by market value
    pub rank: usize,
    pub issuer: String,
    pub market_value: Decimal,
    pub face_value: Decimal,
    pub bond_count: usize,
    pub weight_percentage: Decimal,
    pub extraction_method: ExtractionMethod,
    pub bonds: Vec<BondHolding>,
}

/// Issuer concentration against a weight threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcentrationAnalysis {
    pub concentration_threshold: Decimal,
    pub total_market_value: Decimal,
    pub high_concentration_issuers: Vec<IssuerGroup>,
    pub max_concentration: Option<IssuerGroup>,
}

impl ConcentrationAnalysis {
    pub fn high_concentration_count(&self) -> usize {
        self.high_concentration_issuers.len()
    }
}

/// Per-tier counts for a labelling batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionStats {
    pub cached: usize,
    pub lookup: usize,
    pub name_pattern: usize,
    pub full_name: usize,
}

impl ExtractionStats {
    pub fn record(&mut self, method: ExtractionMethod) {
        match method {
            ExtractionMethod::Cached => self.cached += 1,
            ExtractionMethod::Lookup => self.lookup += 1,
            ExtractionMethod::NamePattern => self.name_pattern += 1,
            ExtractionMethod::FullName => self.full_name += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.cached + self.lookup + self.name_pattern + self.full_name
    }
}

/// Expiry windows for cached issuer lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerCacheSettings {
    pub positive_ttl: Duration,
    /// The provider answered and had no record
    pub not_found_ttl: Duration,
    /// The lookup itself failed (timeout, rate limit, provider error)
    pub failure_ttl: Duration,
}

impl Default for IssuerCacheSettings {
    fn default() -> Self {
        Self {
            positive_ttl: Duration::days(7),
            not_found_ttl: Duration::days(7),
            failure_ttl: Duration::hours(7),
        }
    }
}
