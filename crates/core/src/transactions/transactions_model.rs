//! Transaction domain model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A custody transaction as delivered by the data layer.
///
/// `transaction_type` is the bank's free-text label. Some banks put a multi-line
/// description here; the classifier extracts the type before any lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub date: NaiveDate,
    #[serde(default)]
    pub transaction_type: String,
    /// Signed amount as reported by the bank.
    pub amount: Decimal,
    #[serde(default)]
    pub bank: String,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cusip: Option<String>,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        transaction_type: impl Into<String>,
        amount: Decimal,
        bank: impl Into<String>,
        account: impl Into<String>,
    ) -> Self {
        Self {
            date,
            transaction_type: transaction_type.into(),
            amount,
            bank: bank.into(),
            account: account.into(),
            cusip: None,
        }
    }

    pub fn with_cusip(mut self, cusip: impl Into<String>) -> Self {
        self.cusip = Some(cusip.into());
        self
    }

    /// Whether the transaction falls inside `[start, end]`.
    pub fn is_within(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.date >= start && self.date <= end
    }

    /// Whether the transaction belongs to the given bank/account custody.
    /// Bank codes compare case-insensitively after trimming.
    pub fn belongs_to(&self, bank: &str, account: &str) -> bool {
        self.bank.trim().eq_ignore_ascii_case(bank.trim()) && self.account.trim() == account.trim()
    }
}
