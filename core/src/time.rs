//! Time related utils.

use chrono::Utc;

/// DateTime in UTC, the only time zone this crate deals in.
pub type DateTime = chrono::DateTime<Utc>;

/// Whole seconds since the Unix epoch, the wire form of the
/// replay-protection timestamp.
pub type Timestamp = i64;

/// Create a new DateTime of the current time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Convert a millisecond instant to whole epoch seconds, rounding toward
/// negative infinity so pre-epoch instants stay monotonic.
pub fn millis_to_secs(millis: i64) -> Timestamp {
    millis.div_euclid(1000)
}
