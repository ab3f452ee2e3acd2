//! Issuers module - bond issuer labels and issuer concentration.

mod concentration;
mod issuer_cache;
mod issuer_extractor;
mod issuers_model;
mod name_patterns;

pub use concentration::{analyze_concentration, group_by_issuer, DEFAULT_CONCENTRATION_THRESHOLD};
pub use issuer_cache::{CachedIssuer, IssuerCache};
pub use issuer_extractor::BondIssuerExtractor;
pub use issuers_model::{
    BondHolding, ConcentrationAnalysis, ExtractionMethod, ExtractionStats, IssuerCacheSettings,
    IssuerGroup, IssuerLabel,
};
pub use name_patterns::{standardize_issuer_name, IssuerNameParser, NamePattern};
