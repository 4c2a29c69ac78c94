//! Minute-of-day clock arithmetic.
//!
//! Clock times arrive as `HH:MM` strings from stored records. All interval
//! work happens on minute offsets; offsets above one day (1440) represent
//! the "tomorrow" occurrence of a time, which is how cross-midnight shifts
//! and bonus windows are handled without real calendar arithmetic.

use rust_decimal::Decimal;

/// Minutes in one day-cycle.
pub const MINUTES_PER_DAY: i64 = 1440;

/// Parses an `HH:MM` clock string into minutes since midnight.
///
/// Empty or malformed input yields 0 rather than an error: the engine must
/// degrade gracefully on malformed historical data (a zero time means "no
/// pay impact", the most conservative interpretation).
///
/// # Examples
///
/// ```
/// use worklog_engine::calculation::time_to_minutes;
///
/// assert_eq!(time_to_minutes("08:30"), 510);
/// assert_eq!(time_to_minutes("00:00"), 0);
/// assert_eq!(time_to_minutes(""), 0);
/// assert_eq!(time_to_minutes("garbage"), 0);
/// ```
pub fn time_to_minutes(t: &str) -> i64 {
    let t = t.trim();
    if t.is_empty() {
        return 0;
    }

    let mut parts = t.splitn(2, ':');
    let hours = parts
        .next()
        .and_then(|p| p.parse::<i64>().ok())
        .unwrap_or(0);
    let minutes = parts
        .next()
        .and_then(|p| p.parse::<i64>().ok())
        .unwrap_or(0);

    hours * 60 + minutes
}

/// Returns the overlap in minutes between intervals `[a_start, a_end]` and
/// `[b_start, b_end]`, clamped at zero when they do not intersect.
///
/// # Examples
///
/// ```
/// use worklog_engine::calculation::overlap_minutes;
///
/// assert_eq!(overlap_minutes(0, 100, 50, 150), 50);
/// assert_eq!(overlap_minutes(0, 100, 200, 300), 0);
/// ```
pub fn overlap_minutes(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> i64 {
    let start = a_start.max(b_start);
    let end = a_end.min(b_end);
    (end - start).max(0)
}

/// Converts a minute count to hours as a [`Decimal`].
pub fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::new(minutes, 0) / Decimal::new(60, 0)
}
