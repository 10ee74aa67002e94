//! Canonical clock for the platform.

use chrono::{DateTime, Timelike, Utc};

/// Returns the current time in UTC, truncated to millisecond precision.
///
/// Every timestamp the system compares or stores (token expiry, audit
/// fields) goes through this function so that values survive serialization
/// round trips without sub-millisecond residue changing equality.
pub fn now_utc() -> DateTime<Utc> {
    let now = Utc::now();
    let nanos = now.timestamp_subsec_nanos();
    // with_nanosecond only fails for out-of-range values, which a truncation
    // can never produce
    now.with_nanosecond(nanos - nanos % 1_000_000).unwrap_or(now)
}
