//! Bank-specific reduction of raw type fields to lookup keys.

use regex::{Regex, RegexBuilder};

use super::cash_flows_config::TypeExtraction;
use crate::errors::ClassificationError;

/// Compiled form of a [`TypeExtraction`] rule.
#[derive(Debug, Clone)]
pub(crate) enum TypeExtractor {
    FirstLine,
    Patterns(Vec<Regex>),
}

impl TypeExtractor {
    pub(crate) fn compile(
        bank: &str,
        rule: &TypeExtraction,
    ) -> Result<Self, ClassificationError> {
        match rule {
            TypeExtraction::FirstLine => Ok(TypeExtractor::FirstLine),
            TypeExtraction::Patterns { patterns } => patterns
                .iter()
                .map(|pattern| {
                    RegexBuilder::new(pattern)
                        .case_insensitive(true)
                        .build()
                        .map_err(|e| ClassificationError::InvalidPattern {
                            bank: bank.to_string(),
                            pattern: pattern.clone(),
                            reason: e.to_string(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(TypeExtractor::Patterns),
        }
    }

    /// Extract the type from a raw field. Falls back to the trimmed input
    /// when no pattern matches.
    pub(crate) fn extract(&self, raw: &str) -> String {
        match self {
            TypeExtractor::FirstLine => raw.trim().lines().next().unwrap_or("").trim().to_string(),
            TypeExtractor::Patterns(patterns) => {
                let trimmed = raw.trim();
                patterns
                    .iter()
                    .find_map(|re| {
                        re.captures(trimmed).and_then(|caps| {
                            caps.get(1)
                                .or_else(|| caps.get(0))
                                .map(|m| m.as_str().trim().to_string())
                        })
                    })
                    .unwrap_or_else(|| trimmed.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cash_flows::cash_flows_constants::{IDB_TYPE_PATTERNS, PERSHING_TYPE_PATTERNS};

    fn patterns(list: &[&str]) -> TypeExtractor {
        TypeExtractor::compile(
            "TEST",
            &TypeExtraction::Patterns {
                patterns: list.iter().map(|s| s.to_string()).collect(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_first_line_extraction() {
        let extractor = TypeExtractor::FirstLine;
        assert_eq!(
            extractor.extract("Wire Transfer In\nRef 12345\nOrdering party X"),
            "Wire Transfer In"
        );
        assert_eq!(extractor.extract("  Securities purchase  "), "Securities purchase");
        assert_eq!(extractor.extract("Transfer\r\nmore"), "Transfer");
        assert_eq!(extractor.extract(""), "");
        assert_eq!(extractor.extract("\n\n  Cash Deposit\nRef 7"), "Cash Deposit");
    }

    #[test]
    fn test_idb_prefix_extraction() {
        let extractor = patterns(IDB_TYPE_PATTERNS);
        assert_eq!(
            extractor.extract("Annual Service Fee - Hold Mail 2024"),
            "Annual Service Fee - Hold Mail"
        );
        assert_eq!(extractor.extract("BILL PMT 00123 CREDIT CARD"), "BILL PMT");
        assert_eq!(extractor.extract("purchase 100 APPLE INC"), "purchase");
        assert_eq!(extractor.extract("Dividend Received"), "Dividend Received");
    }

    #[test]
    fn test_pershing_extraction() {
        let extractor = patterns(PERSHING_TYPE_PATTERNS);
        assert_eq!(
            extractor.extract("Buy 250,000 Parvalue Of 912828YK0 At 99.125"),
            "Buy"
        );
        assert_eq!(extractor.extract("Purchase 100 Shares of SPY"), "Purchase");
        assert_eq!(extractor.extract("SELL 10000.00 parvalue of 037833AK6"), "SELL");
        assert_eq!(
            extractor.extract("Activity Within Your Acct"),
            "Activity Within Your Acct"
        );
    }

    #[test]
    fn test_pattern_without_group_uses_whole_match() {
        let extractor = patterns(&[r"^Fee\b"]);
        assert_eq!(extractor.extract("Fee Q1"), "Fee");
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = TypeExtractor::compile(
            "IDB",
            &TypeExtraction::Patterns {
                patterns: vec!["^(Unclosed".to_string()],
            },
        )
        .unwrap_err();
        assert!(matches!(err, ClassificationError::InvalidPattern { ref bank, .. } if bank == "IDB"));
    }
}
