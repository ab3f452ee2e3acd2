//! Modified Dietz return calculation.
//!
//! ```text
//! gain_loss       = adjusted_end - start - Σ flows
//! average_capital = start + Σ flow × (period_days - day) / period_days
//! return %        = gain_loss / average_capital × 100
//! ```
//!
//! Degenerate inputs (zero-length periods, zero average capital) produce a 0%
//! return and a warning, never an error, so one bad account cannot abort a
//! batch of reports.

use std::sync::Arc;

use log::{debug, info, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::alt_adjustments::calculate_alt_adjustments;
use super::performance_model::{
    AltAdjustments, CustodyPeriod, CustodyReturn, DietzSettings, ModifiedDietzResult,
    ReturnPeriod,
};
use crate::cash_flows::{CashFlowClassifier, ClassifiedTransaction};
use crate::constants::{DECIMAL_PRECISION, SMALL_CAPITAL_THRESHOLD};
use crate::transactions::Transaction;
use crate::utils::time_utils::get_days_between;

/// Time-weighted return calculator built on a [`CashFlowClassifier`].
#[derive(Debug, Clone)]
pub struct ModifiedDietzCalculator {
    classifier: Arc<CashFlowClassifier>,
    settings: DietzSettings,
}

impl ModifiedDietzCalculator {
    pub fn new(classifier: Arc<CashFlowClassifier>) -> Self {
        Self::with_settings(classifier, DietzSettings::default())
    }

    pub fn with_settings(classifier: Arc<CashFlowClassifier>, settings: DietzSettings) -> Self {
        Self {
            classifier,
            settings,
        }
    }

    pub fn classifier(&self) -> &CashFlowClassifier {
        &self.classifier
    }

    pub fn settings(&self) -> &DietzSettings {
        &self.settings
    }

    /// Return percentage for the period.
    pub fn calculate_return(&self, period: &ReturnPeriod, transactions: &[Transaction]) -> Decimal {
        self.calculate_return_detailed(period, transactions)
            .return_percentage
    }

    /// Full breakdown for the period. Transactions outside
    /// `[start_date, end_date]` are ignored; input order does not matter.
    pub fn calculate_return_detailed(
        &self,
        period: &ReturnPeriod,
        transactions: &[Transaction],
    ) -> ModifiedDietzResult {
        let period_days = period.period_days();
        if period_days <= 0 {
            warn!(
                "Degenerate period for {}: {} to {} ({} days), returning 0%",
                period.client, period.start_date, period.end_date, period_days
            );
            return Self::degenerate_result(period, period_days);
        }

        let in_period: Vec<ClassifiedTransaction<'_>> = transactions
            .iter()
            .filter(|tx| tx.is_within(period.start_date, period.end_date))
            .map(|transaction| ClassifiedTransaction {
                transaction,
                classification: self.classifier.classify(transaction),
            })
            .collect();

        let days = Decimal::from(period_days);
        let mut net_external_flows = Decimal::ZERO;
        let mut weighted_numerator = Decimal::ZERO;
        let mut external_flow_count = 0usize;

        for item in in_period
            .iter()
            .filter(|item| item.classification.is_external_flow())
        {
            let amount = item.classification.amount;
            let days_since_start = get_days_between(period.start_date, item.transaction.date);
            let remaining = Decimal::from(period_days - days_since_start);

            net_external_flows += amount;
            weighted_numerator += amount * remaining;
            external_flow_count += 1;

            debug!(
                "Flow {} on day {} ({} '{}'): weight {}/{}",
                amount,
                days_since_start,
                item.classification.bank,
                item.classification.transaction_type,
                remaining,
                period_days
            );
        }

        let weighted_external_flows = weighted_numerator / days;

        let alt = self.alt_adjustments(&in_period);
        let adjusted_end_value = alt.apply(period.end_value);
        if !alt.is_empty() {
            info!(
                "ALT adjustments for {}: purchases -{}, sales +{}",
                period.client, alt.purchase_adjustment, alt.sale_adjustment
            );
        }

        let gain_loss = adjusted_end_value - period.start_value - net_external_flows;
        let average_capital = period.start_value + weighted_external_flows;

        let return_percentage = if average_capital.is_zero() {
            warn!(
                "Zero average capital for {} ({} to {}), returning 0%",
                period.client, period.start_date, period.end_date
            );
            Decimal::ZERO
        } else {
            if average_capital.abs() < SMALL_CAPITAL_THRESHOLD {
                warn!(
                    "Average capital {} for {} is very small, return may be unstable",
                    average_capital, period.client
                );
            }
            (gain_loss / average_capital * dec!(100)).round_dp(DECIMAL_PRECISION)
        };

        debug!(
            "Modified Dietz for {}: gain {} / capital {} = {}% ({} flows)",
            period.client, gain_loss, average_capital, return_percentage, external_flow_count
        );

        ModifiedDietzResult {
            client: period.client.clone(),
            start_date: period.start_date,
            end_date: period.end_date,
            period_days,
            start_value: period.start_value,
            end_value: period.end_value,
            adjusted_end_value,
            return_percentage,
            gain_loss,
            net_external_flows,
            weighted_external_flows,
            average_capital,
            external_flow_count,
            alt_purchase_adjustment: alt.purchase_adjustment,
            alt_sale_adjustment: alt.sale_adjustment,
        }
    }

    /// Return of a single (bank, account) custody. Only that custody's
    /// transactions are considered.
    pub fn calculate_custody_return(
        &self,
        custody: &CustodyPeriod,
        transactions: &[Transaction],
    ) -> CustodyReturn {
        let custody_transactions: Vec<Transaction> = transactions
            .iter()
            .filter(|tx| tx.belongs_to(&custody.bank, &custody.account))
            .cloned()
            .collect();

        let result =
            self.calculate_return_detailed(&custody.as_return_period(), &custody_transactions);

        CustodyReturn {
            bank: custody.bank.clone(),
            account: custody.account.clone(),
            custody_name: custody.custody_name.clone(),
            result,
        }
    }

    fn alt_adjustments(&self, in_period: &[ClassifiedTransaction<'_>]) -> AltAdjustments {
        calculate_alt_adjustments(in_period, &self.settings)
    }

    fn degenerate_result(period: &ReturnPeriod, period_days: i64) -> ModifiedDietzResult {
        ModifiedDietzResult {
            client: period.client.clone(),
            start_date: period.start_date,
            end_date: period.end_date,
            period_days,
            start_value: period.start_value,
            end_value: period.end_value,
            adjusted_end_value: period.end_value,
            return_percentage: Decimal::ZERO,
            gain_loss: period.end_value - period.start_value,
            net_external_flows: Decimal::ZERO,
            weighted_external_flows: Decimal::ZERO,
            average_capital: period.start_value,
            external_flow_count: 0,
            alt_purchase_adjustment: Decimal::ZERO,
            alt_sale_adjustment: Decimal::ZERO,
        }
    }
}
