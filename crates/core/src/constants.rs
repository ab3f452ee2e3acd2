use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimal precision for return percentages
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Days per year used to annualize period returns
pub const DAYS_PER_YEAR: Decimal = dec!(365);

/// Average capital below this magnitude produces unstable percentages
pub const SMALL_CAPITAL_THRESHOLD: Decimal = dec!(0.01);

/// Bank code assigned to transactions without one
pub const UNKNOWN_BANK: &str = "UNKNOWN";

/// Label used when a bond has neither a resolvable issuer nor a name
pub const UNKNOWN_ISSUER: &str = "Unknown Issuer";
