//! Security identifiers and identifier-mapping results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::MarketDataError;

/// Number of characters in a CUSIP (8 issue characters plus check digit).
pub const CUSIP_LENGTH: usize = 9;

/// A normalized 9-character CUSIP.
///
/// Custody files carry CUSIPs with padding, lowercase letters, or a trailing
/// 12-character ISIN-like suffix. Only the first nine characters identify the
/// security, so construction trims, uppercases and truncates.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cusip(String);

impl Cusip {
    /// Normalize a raw CUSIP.
    ///
    /// Returns `InvalidIdentifier` when fewer than nine non-blank characters
    /// are available or the prefix contains characters outside `[A-Z0-9*@#]`.
    pub fn parse(raw: &str) -> Result<Self, MarketDataError> {
        let trimmed = raw.trim();
        if trimmed.chars().count() < CUSIP_LENGTH {
            return Err(MarketDataError::InvalidIdentifier(trimmed.to_string()));
        }

        let normalized: String = trimmed
            .chars()
            .take(CUSIP_LENGTH)
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if !normalized
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '*' | '@' | '#'))
        {
            return Err(MarketDataError::InvalidIdentifier(trimmed.to_string()));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cusip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Cusip {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Result of mapping an identifier to an instrument record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierMapping {
    /// Financial Instrument Global Identifier.
    pub figi: Option<String>,
    /// Issuer or instrument name as reported by the provider.
    pub name: String,
    pub ticker: Option<String>,
    pub security_type: Option<String>,
    pub market_sector: Option<String>,
    pub exch_code: Option<String>,
}
