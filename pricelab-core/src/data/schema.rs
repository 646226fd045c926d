//! Input column contract.
//!
//! Source files must carry these columns (case-sensitive). Anything else is
//! dropped on ingest.

pub const DATE: &str = "Date";
pub const OPEN: &str = "Open";
pub const HIGH: &str = "High";
pub const LOW: &str = "Low";
pub const CLOSE: &str = "Close";
pub const VOLUME: &str = "Volume";

/// Required input columns, in output order.
pub const REQUIRED_COLUMNS: [&str; 6] = [DATE, OPEN, HIGH, LOW, CLOSE, VOLUME];

/// Names of required columns absent from `columns`, in contract order.
pub fn missing_columns<S: AsRef<str>>(columns: &[S]) -> Vec<&'static str> {
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|required| !columns.iter().any(|c| c.as_ref() == *required))
        .collect()
}
