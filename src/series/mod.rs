pub mod generator;
pub mod merge;
pub mod placeholder;

use chrono::{DateTime, NaiveDate, Utc};

/// One trading day: epoch seconds (day granularity) and signed profit in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct DailyResult {
    pub date: i64,
    pub profit: i64,
}

/// A source of uniform draws in [0, 1).
/// next_unit() must be deterministic given the source's construction.
pub trait UnitSource {
    fn next_unit(&mut self) -> f64;
}

/// Cents -> major units.
#[inline]
pub fn to_major(minor: i64) -> f64 {
    minor as f64 / 100.0
}

/// Major units -> cents, rounded half away from zero.
#[inline]
pub fn to_minor(major: f64) -> i64 {
    if !major.is_finite() {
        return 0;
    }
    (major * 100.0).round() as i64
}

/// Epoch seconds of 00:00 UTC on `day`.
#[inline]
pub fn day_start_ts(day: NaiveDate) -> i64 {
    day.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(0)
}

/// Epoch seconds -> UTC datetime. Out-of-range values clamp to the epoch.
#[inline]
pub fn ts_to_utc(ts: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(ts, 0).unwrap_or(DateTime::UNIX_EPOCH)
}
