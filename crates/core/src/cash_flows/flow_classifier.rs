//! Cash-flow classification for Modified Dietz returns.
//!
//! Decides per transaction whether the movement is client capital crossing
//! the portfolio boundary (external flow), internal trading, an unreliable
//! label (problematic), or investment performance. Only the last category is
//! part of the return; external flows are time weighted by the calculator.
//!
//! Classification depends only on the bank, the transaction type and the sign
//! of the amount.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;

use super::cash_flows_config::{
    BankTransactionMapping, ClassificationConfig, FallbackPolicy, GlobalFlowTable,
};
use super::cash_flows_model::{
    CashFlowClassification, ClassifiedTransaction, ClassifiedTransactions, FlowCategory,
};
use super::type_extraction::TypeExtractor;
use super::unrecognized_sink::{NoOpUnrecognizedTypeSink, UnrecognizedTypeSink};
use crate::constants::UNKNOWN_BANK;
use crate::errors::{ClassificationError, Result};
use crate::transactions::Transaction;

/// Normalize a bank code for lookup: trimmed, uppercase, `UNKNOWN` when blank.
pub fn normalize_bank_code(bank: &str) -> String {
    let trimmed = bank.trim();
    if trimmed.is_empty() {
        UNKNOWN_BANK.to_string()
    } else {
        trimmed.to_uppercase()
    }
}

fn type_key(transaction_type: &str) -> String {
    transaction_type.trim().to_lowercase()
}

fn key_set(types: &[String]) -> HashSet<String> {
    types
        .iter()
        .map(|t| type_key(t))
        .filter(|k| !k.is_empty())
        .collect()
}

/// Resolve a type listed as inflow and/or outflow. When listed as both, the
/// amount sign decides.
fn flow_direction(is_inflow: bool, is_outflow: bool, amount: Decimal) -> Option<FlowCategory> {
    match (is_inflow, is_outflow) {
        (true, true) if amount.is_sign_negative() && !amount.is_zero() => {
            Some(FlowCategory::ExternalOutflow)
        }
        (true, _) => Some(FlowCategory::ExternalInflow),
        (false, true) => Some(FlowCategory::ExternalOutflow),
        (false, false) => None,
    }
}

#[derive(Debug, Clone)]
struct CompiledBankTable {
    inflows: HashSet<String>,
    outflows: HashSet<String>,
    trading: HashSet<String>,
    problematic: HashSet<String>,
    investment_included: HashSet<String>,
}

impl CompiledBankTable {
    fn compile(mapping: &BankTransactionMapping) -> Self {
        Self {
            inflows: key_set(&mapping.external_inflows),
            outflows: key_set(&mapping.external_outflows),
            trading: key_set(&mapping.trading_excluded),
            problematic: key_set(&mapping.problematic_excluded),
            investment_included: key_set(&mapping.investment_included),
        }
    }

    fn lookup(&self, key: &str, amount: Decimal) -> Option<FlowCategory> {
        flow_direction(self.inflows.contains(key), self.outflows.contains(key), amount)
            .or_else(|| self.trading.contains(key).then_some(FlowCategory::Trading))
            .or_else(|| {
                self.problematic
                    .contains(key)
                    .then_some(FlowCategory::Problematic)
            })
            .or_else(|| {
                self.investment_included
                    .contains(key)
                    .then_some(FlowCategory::InvestmentPerformance)
            })
    }

    fn explicitly_included(&self, key: &str) -> bool {
        self.investment_included.contains(key)
    }
}

#[derive(Debug, Clone)]
struct CompiledGlobalTable {
    inflows: HashSet<String>,
    outflows: HashSet<String>,
    problematic: HashSet<String>,
}

impl CompiledGlobalTable {
    fn compile(table: &GlobalFlowTable) -> Self {
        Self {
            inflows: key_set(&table.inflows),
            outflows: key_set(&table.outflows),
            problematic: key_set(&table.problematic),
        }
    }

    fn lookup(&self, key: &str, amount: Decimal) -> Option<FlowCategory> {
        flow_direction(self.inflows.contains(key), self.outflows.contains(key), amount).or_else(
            || {
                self.problematic
                    .contains(key)
                    .then_some(FlowCategory::Problematic)
            },
        )
    }
}

/// Classifies custody transactions into [`FlowCategory`]s.
///
/// Immutable after construction and safe to share across threads. The only
/// side channel is the [`UnrecognizedTypeSink`], which never influences the
/// result.
#[derive(Clone)]
pub struct CashFlowClassifier {
    config: ClassificationConfig,
    /// Mappings re-keyed by normalized bank code.
    mappings: HashMap<String, BankTransactionMapping>,
    banks: HashMap<String, CompiledBankTable>,
    global: CompiledGlobalTable,
    extractors: HashMap<String, TypeExtractor>,
    known_investment_types: HashSet<String>,
    sink: Arc<dyn UnrecognizedTypeSink>,
}

impl CashFlowClassifier {
    /// Build a classifier from a configuration.
    ///
    /// Bank codes in the configuration are normalized; two entries that
    /// normalize to the same code are merged. Fails when an extraction
    /// pattern does not compile.
    pub fn new(config: ClassificationConfig) -> Result<Self> {
        let mut mappings: HashMap<String, BankTransactionMapping> = HashMap::new();
        for (bank, mapping) in &config.banks {
            let code = normalize_bank_code(bank);
            if code == UNKNOWN_BANK && bank.trim().is_empty() {
                return Err(ClassificationError::InvalidConfig(
                    "bank mapping with an empty bank code".to_string(),
                )
                .into());
            }
            let merged = mappings.entry(code).or_default();
            merged.external_inflows.extend(mapping.external_inflows.iter().cloned());
            merged.external_outflows.extend(mapping.external_outflows.iter().cloned());
            merged.trading_excluded.extend(mapping.trading_excluded.iter().cloned());
            merged.problematic_excluded.extend(mapping.problematic_excluded.iter().cloned());
            merged.investment_included.extend(mapping.investment_included.iter().cloned());
        }

        let banks = mappings
            .iter()
            .map(|(code, mapping)| (code.clone(), CompiledBankTable::compile(mapping)))
            .collect();

        let extractors = config
            .type_extraction
            .iter()
            .map(|(bank, rule)| {
                let code = normalize_bank_code(bank);
                TypeExtractor::compile(&code, rule).map(|extractor| (code, extractor))
            })
            .collect::<std::result::Result<HashMap<_, _>, _>>()?;

        let global = CompiledGlobalTable::compile(&config.global);
        let known_investment_types = key_set(&config.known_investment_types);

        debug!(
            "Cash-flow classifier built for {} banks ({} with type extraction)",
            mappings.len(),
            extractors.len()
        );

        Ok(Self {
            config,
            mappings,
            banks,
            global,
            extractors,
            known_investment_types,
            sink: Arc::new(NoOpUnrecognizedTypeSink),
        })
    }

    /// Classifier over the built-in tables.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ClassificationConfig::default())
    }

    /// Attach a sink for unrecognized investment types.
    pub fn with_sink(mut self, sink: Arc<dyn UnrecognizedTypeSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &ClassificationConfig {
        &self.config
    }

    /// Reduce a raw type field to the type used for lookup.
    pub fn extract_transaction_type(&self, bank: &str, raw_type: &str) -> String {
        let code = normalize_bank_code(bank);
        match self.extractors.get(&code) {
            Some(extractor) => extractor.extract(raw_type),
            None => raw_type.trim().to_string(),
        }
    }

    fn categorize(&self, bank: &str, key: &str, amount: Decimal) -> FlowCategory {
        if key.is_empty() {
            return FlowCategory::Problematic;
        }

        let category = match self.banks.get(bank) {
            Some(table) => table.lookup(key, amount).or_else(|| {
                match self.config.fallback_policy {
                    FallbackPolicy::Always => self.global.lookup(key, amount),
                    FallbackPolicy::UnknownBanksOnly => None,
                }
            }),
            None => self.global.lookup(key, amount),
        };

        category.unwrap_or(FlowCategory::InvestmentPerformance)
    }

    /// Classify one transaction.
    pub fn classify(&self, transaction: &Transaction) -> CashFlowClassification {
        let bank = normalize_bank_code(&transaction.bank);
        let transaction_type =
            self.extract_transaction_type(&bank, &transaction.transaction_type);
        let key = type_key(&transaction_type);
        let category = self.categorize(&bank, &key, transaction.amount);

        if category == FlowCategory::InvestmentPerformance
            && !self.known_investment_types.contains(&key)
            && !self
                .banks
                .get(&bank)
                .is_some_and(|table| table.explicitly_included(&key))
        {
            self.sink.record(&bank, &transaction_type);
        }

        let amount = match category {
            FlowCategory::ExternalInflow => transaction.amount.abs(),
            FlowCategory::ExternalOutflow => -transaction.amount.abs(),
            _ => Decimal::ZERO,
        };

        debug!(
            "Classified {} '{}' ({}) as {:?}",
            bank, transaction_type, transaction.amount, category
        );

        CashFlowClassification {
            category,
            transaction_type,
            bank,
            amount,
        }
    }

    /// Whether the transaction is left out of investment performance.
    pub fn is_excluded(&self, transaction: &Transaction) -> bool {
        self.classify(transaction).is_excluded()
    }

    /// Signed external flow amount: positive inflow, negative outflow, else 0.
    pub fn cash_flow_amount(&self, transaction: &Transaction) -> Decimal {
        self.classify(transaction).amount
    }

    /// Group a batch of transactions by category, preserving input order
    /// within each group.
    pub fn partition<'a>(&self, transactions: &'a [Transaction]) -> ClassifiedTransactions<'a> {
        let mut grouped = ClassifiedTransactions::default();
        for transaction in transactions {
            grouped.push(ClassifiedTransaction {
                transaction,
                classification: self.classify(transaction),
            });
        }
        grouped
    }

    /// The global fallback table.
    pub fn excluded_types(&self) -> &GlobalFlowTable {
        &self.config.global
    }

    /// Normalized codes of banks with their own mapping, sorted.
    pub fn supported_banks(&self) -> Vec<&str> {
        let mut banks: Vec<&str> = self.mappings.keys().map(String::as_str).collect();
        banks.sort_unstable();
        banks
    }

    /// The (merged) mapping for a bank, if it has one.
    pub fn mapping_for(&self, bank: &str) -> Option<&BankTransactionMapping> {
        self.mappings.get(&normalize_bank_code(bank))
    }
}

impl std::fmt::Debug for CashFlowClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CashFlowClassifier")
            .field("banks", &self.supported_banks())
            .field("fallback_policy", &self.config.fallback_policy)
            .finish()
    }
}
