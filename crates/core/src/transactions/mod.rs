//! Transactions module - custody transaction input records.

mod transactions_model;

pub use transactions_model::Transaction;
