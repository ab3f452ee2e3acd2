//! Aurum Core - Return engine, cash-flow classification and issuer labelling.
//!
//! This crate contains the reporting logic behind client portfolio reports.
//! It performs no I/O of its own apart from loading classification config
//! files; issuer lookups go through the `aurum-market-data` provider trait.

pub mod cash_flows;
pub mod constants;
pub mod errors;
pub mod issuers;
pub mod performance;
pub mod transactions;
pub mod utils;

pub use cash_flows::{CashFlowClassifier, ClassificationConfig, FlowCategory};
pub use issuers::{BondIssuerExtractor, IssuerCache};
pub use performance::{ModifiedDietzCalculator, ModifiedDietzResult, ReturnPeriod};
pub use transactions::Transaction;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
