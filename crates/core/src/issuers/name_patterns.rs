//! Issuer extraction from free-text bond names.
//!
//! Extraction is an ordered list of `(pattern, template)` pairs tried in turn
//! against the uppercased name. The first pattern whose standardized result
//! is non-empty wins. Supporting a new naming convention means adding a pair,
//! not touching the matching loop.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::errors::{ClassificationError, Result};

// ============================================================================
// PATTERN TABLES
// ============================================================================

/// Built-in extraction patterns, in priority order.
const DEFAULT_NAME_PATTERNS: &[(&str, &str)] = &[
    (r"^(US TREASURY|US TREAS)\b.*", "US Treasury"),
    (r"^TREASURY\s+(BILL|NOTE|BOND)\b.*", "US Treasury"),
    // "COMPANY NAME 3.25% 05/15/29"
    (
        r"^([A-Z][A-Z\s&.\-']+?)\s+\d+(?:\.\d+)?%\s+\d{2}/\d{2}/\d{2,4}",
        "$1",
    ),
    // "COMPANY NAME 5 1/2 11/15/30"
    (
        r"^([A-Z][A-Z\s&.\-']+?)\s+\d+\s+\d+/\d+\s+\d{2}/\d{2}/\d{2,4}",
        "$1",
    ),
    (r"^BK OF (.+)", "Bank of $1"),
    // Everything before the first number
    (r"^([A-Z][A-Z\s&.\-']{2,}?)\s+\d", "$1"),
    // First meaningful run of letters
    (r"^([A-Z][A-Z\s&.\-']{2,})", "$1"),
];

lazy_static! {
    static ref IDENTIFIER_PREFIXES: Vec<Regex> = vec![
        Regex::new(r"(?i)^\s*CUSIP\s*:?\s*\w+\s*").expect("Invalid regex pattern"),
        Regex::new(r"(?i)^\s*ISIN\s*:?\s*\w+\s*").expect("Invalid regex pattern"),
    ];

    /// Standardization passes applied in order to every extracted name.
    static ref STANDARDIZATION_RULES: Vec<(Regex, &'static str)> = [
        // Bond terms trailing the issuer
        (r"(?i)\s+CPN\s*:?.*$", ""),
        (r"(?i)\s+DUE\s*:?.*$", ""),
        (r"(?i)\s+CALLABLE\s+AT.*$", ""),
        (r"(?i)\s+MATURITY\s*:?.*$", ""),
        // Note qualifiers, before suffixes so "INC MTN" becomes "Inc"
        (r"(?i)(?:\s+(?:MTN|SR|JR))+\s*$", ""),
        // Legal form suffixes
        (r"(?i)\s+CORP\.?\s*$", " Corporation"),
        (r"(?i)\s+INC\.?\s*$", " Inc"),
        (r"(?i)\s+CO\.?\s*$", " Company"),
        // Abbreviations
        (r"(?i)\bMTR\b", "MOTOR"),
        (r"(?i)\bINTL\b", "INTERNATIONAL"),
        (r"(?i)\bFINL\b", "FINANCIAL"),
        (r"(?i)\bNATL\b", "NATIONAL"),
        (r"(?i)\bSYS\b", "SYSTEMS"),
        // Banks
        (r"(?i)^BK OF (.+)", "Bank of $1"),
        (r"(?i)^BANK OF (.+)", "Bank of $1"),
        // Issuers that appear under several spellings
        (r"(?i)^T-MOBILE USA.*", "T-MOBILE USA Inc"),
        (r"(?i)^CVS HEALTH.*", "CVS HEALTH Corporation"),
        (r"(?i)^CITIGROUP.*", "CITIGROUP Inc"),
        (r"(?i)^FORD (MTR|MOTOR).*", "FORD MOTOR Company"),
        (r"(?i)^ENERGY TRANSFER LP.*", "ENERGY TRANSFER LP"),
        (r"(?i)^WESTERN MIDSTREAM OPERATING LP.*", "WESTERN MIDSTREAM OPERATING LP"),
        (r"(?i)^WESTN MIDSTREAM OPERA.*", "WESTERN MIDSTREAM OPERATING LP"),
    ]
    .iter()
    .map(|(pattern, replacement)| {
        (Regex::new(pattern).expect("Invalid regex pattern"), *replacement)
    })
    .collect();

    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("Invalid regex pattern");
}

/// One extraction strategy: a regex and the template that builds the issuer
/// from its captures (`$1` etc.). A template without captures is a fixed label.
#[derive(Debug, Clone)]
pub struct NamePattern {
    regex: Regex,
    template: String,
}

impl NamePattern {
    pub fn new(pattern: &str, template: impl Into<String>) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| ClassificationError::InvalidNamePattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            regex,
            template: template.into(),
        })
    }

    fn apply(&self, name: &str) -> Option<String> {
        let captures = self.regex.captures(name)?;
        let mut extracted = String::new();
        captures.expand(&self.template, &mut extracted);
        Some(extracted)
    }
}

/// Remove trailing bond terms and normalize suffixes and abbreviations.
pub fn standardize_issuer_name(raw_name: &str) -> String {
    let mut standardized = raw_name.trim().to_string();
    for (pattern, replacement) in STANDARDIZATION_RULES.iter() {
        standardized = pattern.replace(&standardized, *replacement).into_owned();
    }
    WHITESPACE.replace_all(&standardized, " ").trim().to_string()
}

fn strip_identifier_prefixes(name: &str) -> String {
    let mut stripped = name.to_string();
    for prefix in IDENTIFIER_PREFIXES.iter() {
        stripped = prefix.replace(&stripped, "").into_owned();
    }
    stripped.trim().to_string()
}

/// Ordered strategy list for tier-3 extraction.
#[derive(Debug, Clone)]
pub struct IssuerNameParser {
    patterns: Vec<NamePattern>,
}

impl Default for IssuerNameParser {
    fn default() -> Self {
        let patterns = DEFAULT_NAME_PATTERNS
            .iter()
            .map(|(pattern, template)| NamePattern {
                regex: Regex::new(pattern).expect("Invalid regex pattern"),
                template: template.to_string(),
            })
            .collect();
        Self { patterns }
    }
}

impl IssuerNameParser {
    /// Parser with no patterns; every name falls through.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Append a strategy after the existing ones.
    pub fn with_pattern(mut self, pattern: &str, template: impl Into<String>) -> Result<Self> {
        self.patterns.push(NamePattern::new(pattern, template)?);
        Ok(self)
    }

    /// Insert a strategy ahead of the existing ones.
    pub fn with_priority_pattern(
        mut self,
        pattern: &str,
        template: impl Into<String>,
    ) -> Result<Self> {
        self.patterns.insert(0, NamePattern::new(pattern, template)?);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Extract a standardized issuer, or `None` when no strategy applies.
    pub fn extract(&self, bond_name: &str) -> Option<String> {
        let cleaned = strip_identifier_prefixes(&bond_name.trim().to_uppercase());
        if cleaned.is_empty() {
            return None;
        }

        self.patterns.iter().find_map(|pattern| {
            let extracted = pattern.apply(&cleaned)?;
            let standardized = standardize_issuer_name(&extracted);
            if standardized.is_empty() {
                None
            } else {
                debug!("Extracted '{}' from bond name '{}'", standardized, bond_name);
                Some(standardized)
            }
        })
    }
}
