use log::warn;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::constants::DAYS_PER_YEAR;

/// Convert a period return percentage to an annualized percentage:
/// `((1 + r/100)^(365/days) - 1) * 100`.
///
/// Returns 0 for non-positive periods and floors total losses at -100%.
pub fn annualize_return(period_return_pct: Decimal, period_days: i64) -> Decimal {
    if period_days <= 0 {
        return Decimal::ZERO;
    }

    let base = Decimal::ONE + period_return_pct / dec!(100);
    if base <= Decimal::ZERO {
        return dec!(-100);
    }

    let exponent = DAYS_PER_YEAR / Decimal::from(period_days);
    match base.checked_powd(exponent) {
        Some(growth) => (growth - Decimal::ONE) * dec!(100),
        None => {
            warn!(
                "Annualizing {}% over {} days overflowed, reporting 0",
                period_return_pct, period_days
            );
            Decimal::ZERO
        }
    }
}
