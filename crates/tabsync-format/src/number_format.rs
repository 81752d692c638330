//! Display number-format patterns for derived columns.

/// Labor-hour columns (planned hours, totals, daily entries).
pub const HOURS_PATTERN: &str = "0.0#";

/// Date columns (deadline, completion, assembly start).
pub const DATE_PATTERN: &str = "yyyy-mm-dd";

/// Last-update timestamp columns.
pub const TIMESTAMP_PATTERN: &str = "yyyy-mm-dd hh:mm:ss";
