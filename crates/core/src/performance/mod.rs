//! Performance module - Modified Dietz returns and annualization.

mod alt_adjustments;
mod annualization;
mod modified_dietz;
mod performance_model;

pub use alt_adjustments::calculate_alt_adjustments;
pub use annualization::annualize_return;
pub use modified_dietz::ModifiedDietzCalculator;
pub use performance_model::{
    AltAdjustments, CustodyPeriod, CustodyReturn, DietzSettings, ModifiedDietzResult,
    ReturnPeriod,
};
