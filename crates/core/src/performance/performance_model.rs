use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::utils::time_utils::get_days_between;

/// Portfolio values at the boundaries of a return period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnPeriod {
    pub client: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_value: Decimal,
    pub end_value: Decimal,
}

impl ReturnPeriod {
    pub fn new(
        client: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        start_value: Decimal,
        end_value: Decimal,
    ) -> Self {
        Self {
            client: client.into(),
            start_date,
            end_date,
            start_value,
            end_value,
        }
    }

    pub fn period_days(&self) -> i64 {
        get_days_between(self.start_date, self.end_date)
    }
}

/// Full breakdown of a Modified Dietz calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedDietzResult {
    pub client: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub period_days: i64,
    pub start_value: Decimal,
    pub end_value: Decimal,
    /// End value after ALT purchase/sale adjustments
    pub adjusted_end_value: Decimal,
    pub return_percentage: Decimal,
    pub gain_loss: Decimal,
    pub net_external_flows: Decimal,
    pub weighted_external_flows: Decimal,
    pub average_capital: Decimal,
    /// Transactions classified as external inflows or outflows. Trading and
    /// problematic rows are excluded from the return but not counted here.
    pub external_flow_count: usize,
    pub alt_purchase_adjustment: Decimal,
    pub alt_sale_adjustment: Decimal,
}

/// End-value corrections for alternative investments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AltAdjustments {
    /// Subtracted from the end value
    pub purchase_adjustment: Decimal,
    /// Added back to the end value
    pub sale_adjustment: Decimal,
    pub purchases_adjusted: usize,
    pub sales_adjusted: usize,
}

impl AltAdjustments {
    pub fn is_empty(&self) -> bool {
        self.purchase_adjustment.is_zero() && self.sale_adjustment.is_zero()
    }

    pub fn apply(&self, end_value: Decimal) -> Decimal {
        end_value - self.purchase_adjustment + self.sale_adjustment
    }
}

/// Calculator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DietzSettings {
    pub alt_bank_code: String,
    pub apply_alt_adjustments: bool,
    /// A same-day withdrawal matches an ALT sale when its magnitude is at
    /// least this fraction of the sale.
    pub alt_sale_match_tolerance: Decimal,
}

impl Default for DietzSettings {
    fn default() -> Self {
        Self {
            alt_bank_code: "ALT".to_string(),
            apply_alt_adjustments: true,
            alt_sale_match_tolerance: dec!(0.95),
        }
    }
}

/// One custody account over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustodyPeriod {
    pub client: String,
    pub bank: String,
    pub account: String,
    pub custody_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_value: Decimal,
    pub end_value: Decimal,
}

impl CustodyPeriod {
    /// Custody named "<bank> <account>".
    pub fn new(
        client: impl Into<String>,
        bank: impl Into<String>,
        account: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        start_value: Decimal,
        end_value: Decimal,
    ) -> Self {
        let bank = bank.into();
        let account = account.into();
        Self {
            client: client.into(),
            custody_name: format!("{} {}", bank, account),
            bank,
            account,
            start_date,
            end_date,
            start_value,
            end_value,
        }
    }

    pub fn as_return_period(&self) -> ReturnPeriod {
        ReturnPeriod::new(
            self.client.clone(),
            self.start_date,
            self.end_date,
            self.start_value,
            self.end_value,
        )
    }
}

/// Return of one custody account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustodyReturn {
    pub bank: String,
    pub account: String,
    pub custody_name: String,
    pub result: ModifiedDietzResult,
}
