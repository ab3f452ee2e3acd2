//! End-value corrections for alternative investments.
//!
//! ALT purchases are excluded from cash flows, yet the new position lifts the
//! end value: without a correction the purchase shows up as a gain. ALT sales
//! are part of the return, yet when the proceeds leave through a same-day
//! withdrawal the end value drops: without a correction the sale shows up as
//! a loss.

use log::debug;
use rust_decimal::Decimal;

use super::performance_model::{AltAdjustments, DietzSettings};
use crate::cash_flows::{normalize_bank_code, ClassifiedTransaction};

/// Compute ALT adjustments over the transactions of one period.
pub fn calculate_alt_adjustments(
    transactions: &[ClassifiedTransaction<'_>],
    settings: &DietzSettings,
) -> AltAdjustments {
    let mut adjustments = AltAdjustments::default();
    if !settings.apply_alt_adjustments {
        return adjustments;
    }

    let alt_bank = normalize_bank_code(&settings.alt_bank_code);

    for item in transactions
        .iter()
        .filter(|item| item.classification.bank == alt_bank)
    {
        let classification = &item.classification;
        let transaction = item.transaction;
        let type_key = classification.transaction_type.to_lowercase();
        let magnitude = transaction.amount.abs();

        if type_key == "purchase" && classification.is_excluded() && classification.amount.is_zero()
        {
            adjustments.purchase_adjustment += magnitude;
            adjustments.purchases_adjusted += 1;
            debug!("ALT purchase adjustment: -{} on {}", magnitude, transaction.date);
        } else if type_key == "sale" && !classification.is_excluded() {
            let threshold = magnitude * settings.alt_sale_match_tolerance;
            let has_matching_withdrawal = transactions.iter().any(|other| {
                other.transaction.date == transaction.date
                    && other
                        .transaction
                        .transaction_type
                        .to_lowercase()
                        .contains("withdrawal")
                    && other.transaction.amount.abs() >= threshold
            });

            if has_matching_withdrawal {
                adjustments.sale_adjustment += magnitude;
                adjustments.sales_adjusted += 1;
                debug!("ALT sale adjustment: +{} on {}", magnitude, transaction.date);
            }
        }
    }

    adjustments
}
