//! Cash-flow classification models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transactions::Transaction;

/// How a transaction is treated by the Modified Dietz calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowCategory {
    /// Client money entering the portfolio
    ExternalInflow,
    /// Client money leaving the portfolio
    ExternalOutflow,
    /// Buys, sells and redemptions: value moves between positions
    Trading,
    /// Labels too ambiguous to trust, or missing
    Problematic,
    /// Income, fees and everything else that is part of the return
    InvestmentPerformance,
}

impl FlowCategory {
    /// Excluded from the investment-performance side of the calculation.
    pub fn is_excluded(self) -> bool {
        !matches!(self, FlowCategory::InvestmentPerformance)
    }

    pub fn is_external_flow(self) -> bool {
        matches!(
            self,
            FlowCategory::ExternalInflow | FlowCategory::ExternalOutflow
        )
    }
}

/// Result of classifying one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowClassification {
    pub category: FlowCategory,
    /// Type after bank-specific extraction.
    pub transaction_type: String,
    /// Normalized (trimmed, uppercase) bank code.
    pub bank: String,
    /// Positive for inflows, negative for outflows, zero otherwise.
    pub amount: Decimal,
}

impl CashFlowClassification {
    pub fn is_excluded(&self) -> bool {
        self.category.is_excluded()
    }

    pub fn is_external_flow(&self) -> bool {
        self.category.is_external_flow()
    }
}

/// A transaction paired with its classification.
#[derive(Debug, Clone)]
pub struct ClassifiedTransaction<'a> {
    pub transaction: &'a Transaction,
    pub classification: CashFlowClassification,
}

/// A batch of transactions grouped by category.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedTransactions<'a> {
    pub external_flows: Vec<ClassifiedTransaction<'a>>,
    pub trading: Vec<ClassifiedTransaction<'a>>,
    pub problematic: Vec<ClassifiedTransaction<'a>>,
    pub investment: Vec<ClassifiedTransaction<'a>>,
}

impl<'a> ClassifiedTransactions<'a> {
    pub fn push(&mut self, item: ClassifiedTransaction<'a>) {
        match item.classification.category {
            FlowCategory::ExternalInflow | FlowCategory::ExternalOutflow => {
                self.external_flows.push(item)
            }
            FlowCategory::Trading => self.trading.push(item),
            FlowCategory::Problematic => self.problematic.push(item),
            FlowCategory::InvestmentPerformance => self.investment.push(item),
        }
    }

    /// Sum of signed external flow amounts.
    pub fn net_external_flows(&self) -> Decimal {
        self.external_flows
            .iter()
            .map(|item| item.classification.amount)
            .sum()
    }

    pub fn excluded_count(&self) -> usize {
        self.external_flows.len() + self.trading.len() + self.problematic.len()
    }

    pub fn len(&self) -> usize {
        self.excluded_count() + self.investment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
