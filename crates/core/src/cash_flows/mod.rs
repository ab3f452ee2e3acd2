//! Cash flows module - transaction classification for performance returns.

mod cash_flows_config;
mod cash_flows_constants;
mod cash_flows_model;
mod flow_classifier;
mod type_extraction;
mod unrecognized_sink;

pub use cash_flows_config::{
    BankTransactionMapping, ClassificationConfig, FallbackPolicy, GlobalFlowTable, TypeExtraction,
};
pub use cash_flows_constants::{BankTypeTable, BANK_TYPE_TABLES, KNOWN_INVESTMENT_TYPES};
pub use cash_flows_model::{
    CashFlowClassification, ClassifiedTransaction, ClassifiedTransactions, FlowCategory,
};
pub use flow_classifier::{normalize_bank_code, CashFlowClassifier};
pub use unrecognized_sink::{
    CollectingUnrecognizedTypeSink, NoOpUnrecognizedTypeSink, UnrecognizedTypeSink,
};

#[cfg(test)]
mod flow_classifier_tests;
