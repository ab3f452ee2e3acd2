//! Classification configuration.
//!
//! The classifier never reads global tables directly. It is built from a
//! `ClassificationConfig`, whose `Default` carries the built-in tables and
//! which can be loaded from JSON to substitute fixtures or new custodians.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::cash_flows_constants::{
    BANK_TYPE_TABLES, CS_BANK, GLOBAL_INFLOW_TYPES, GLOBAL_OUTFLOW_TYPES,
    GLOBAL_PROBLEMATIC_TYPES, IDB_BANK, IDB_TYPE_PATTERNS, KNOWN_INVESTMENT_TYPES, PERSHING_BANK,
    PERSHING_TYPE_PATTERNS,
};
use crate::errors::Result;

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Transaction type lists for one bank.
///
/// Types in the first four lists are excluded from the return calculation.
/// `investment_included` marks types that are investment performance for
/// this bank even though they would not appear in the known-types reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BankTransactionMapping {
    pub external_inflows: Vec<String>,
    pub external_outflows: Vec<String>,
    pub trading_excluded: Vec<String>,
    pub problematic_excluded: Vec<String>,
    pub investment_included: Vec<String>,
}

/// Fallback table for banks without a mapping of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalFlowTable {
    pub inflows: Vec<String>,
    pub outflows: Vec<String>,
    pub problematic: Vec<String>,
}

impl Default for GlobalFlowTable {
    fn default() -> Self {
        Self {
            inflows: to_owned_list(GLOBAL_INFLOW_TYPES),
            outflows: to_owned_list(GLOBAL_OUTFLOW_TYPES),
            problematic: to_owned_list(GLOBAL_PROBLEMATIC_TYPES),
        }
    }
}

/// How a bank's raw type field is reduced to a lookup key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeExtraction {
    /// The type is the first line of a multi-line description.
    FirstLine,
    /// Ordered regexes, matched case-insensitively. The first match wins and
    /// its first capture group (or the whole match) is the type.
    Patterns { patterns: Vec<String> },
}

/// When the global table is consulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FallbackPolicy {
    /// Only for banks that have no mapping.
    #[default]
    UnknownBanksOnly,
    /// Also for known banks whose own mapping does not match the type.
    Always,
}

/// Complete input to [`CashFlowClassifier`](super::CashFlowClassifier).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassificationConfig {
    pub banks: BTreeMap<String, BankTransactionMapping>,
    pub global: GlobalFlowTable,
    pub type_extraction: BTreeMap<String, TypeExtraction>,
    pub known_investment_types: Vec<String>,
    pub fallback_policy: FallbackPolicy,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        let banks = BANK_TYPE_TABLES
            .iter()
            .map(|table| {
                (
                    table.bank.to_string(),
                    BankTransactionMapping {
                        external_inflows: to_owned_list(table.inflows),
                        external_outflows: to_owned_list(table.outflows),
                        trading_excluded: to_owned_list(table.trading),
                        problematic_excluded: to_owned_list(table.problematic),
                        investment_included: to_owned_list(table.investment_included),
                    },
                )
            })
            .collect();

        let mut type_extraction = BTreeMap::new();
        type_extraction.insert(CS_BANK.to_string(), TypeExtraction::FirstLine);
        type_extraction.insert(
            IDB_BANK.to_string(),
            TypeExtraction::Patterns {
                patterns: to_owned_list(IDB_TYPE_PATTERNS),
            },
        );
        type_extraction.insert(
            PERSHING_BANK.to_string(),
            TypeExtraction::Patterns {
                patterns: to_owned_list(PERSHING_TYPE_PATTERNS),
            },
        );

        Self {
            banks,
            global: GlobalFlowTable::default(),
            type_extraction,
            known_investment_types: to_owned_list(KNOWN_INVESTMENT_TYPES),
            fallback_policy: FallbackPolicy::default(),
        }
    }
}

impl ClassificationConfig {
    /// Parse a configuration from JSON. Missing sections take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Replace or add the mapping for one bank.
    pub fn with_bank(mut self, bank: impl Into<String>, mapping: BankTransactionMapping) -> Self {
        self.banks.insert(bank.into(), mapping);
        self
    }

    pub fn with_fallback_policy(mut self, policy: FallbackPolicy) -> Self {
        self.fallback_policy = policy;
        self
    }
}
