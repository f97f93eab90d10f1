/// Home currency used when none is configured
pub const DEFAULT_HOME_CURRENCY: &str = "USD";

/// Age in days after which a selected FX rate is reported as stale.
/// A rate exactly this old is still fresh.
pub const DEFAULT_STALE_RATE_DAYS: i64 = 3;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Date format accepted for valuation dates and CSV date columns
pub const DATE_FORMAT: &str = "%Y-%m-%d";
