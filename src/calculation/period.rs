//! Calendar grouping: weeks, months and company partitions.
//!
//! Weeks run Monday through Sunday. Month totals are computed by splitting
//! the month into its calendar weeks, pricing each week independently and
//! summing the additive results, so a month never grants more weekly
//! allowance than its weeks do.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};

use crate::models::{PeriodResult, Shift};

use super::weekly_allocation::{AllocationMode, process_shifts};
use super::PayContext;

/// Returns the Monday of the week containing `date`.
///
/// # Example
///
/// ```
/// use worklog_engine::calculation::week_start_monday;
/// use chrono::NaiveDate;
///
/// // 2026-01-15 is a Thursday.
/// let thursday = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// assert_eq!(
///     week_start_monday(thursday),
///     NaiveDate::from_ymd_opt(2026, 1, 12).unwrap()
/// );
/// ```
pub fn week_start_monday(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

/// Returns the Monday-Sunday week containing `reference`, inclusive.
pub fn week_range(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = week_start_monday(reference);
    (start, start + Days::new(6))
}

/// Returns the first and last day of the month containing `reference`,
/// inclusive.
pub fn month_range(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = reference.with_day(1).unwrap_or(reference);
    let next_month = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    };
    let end = next_month
        .map(|d| d - Days::new(1))
        .unwrap_or(reference);
    (start, end)
}

/// Returns the shifts whose date falls inside `[start, end]`, inclusive.
pub fn shifts_in_range(shifts: &[Shift], start: NaiveDate, end: NaiveDate) -> Vec<Shift> {
    shifts
        .iter()
        .filter(|s| s.date >= start && s.date <= end)
        .cloned()
        .collect()
}

/// Partitions shifts by company id, in stable id order.
///
/// Shifts with an empty company id are dropped: they have no company row
/// to attribute a breakdown to.
pub fn group_by_company(shifts: &[Shift]) -> BTreeMap<String, Vec<Shift>> {
    let mut groups: BTreeMap<String, Vec<Shift>> = BTreeMap::new();
    for shift in shifts {
        if shift.company_id.is_empty() {
            continue;
        }
        groups
            .entry(shift.company_id.clone())
            .or_default()
            .push(shift.clone());
    }
    groups
}

/// Partitions shifts by the Monday of their week, in chronological order.
pub fn group_by_week(shifts: &[Shift]) -> BTreeMap<NaiveDate, Vec<Shift>> {
    let mut groups: BTreeMap<NaiveDate, Vec<Shift>> = BTreeMap::new();
    for shift in shifts {
        groups
            .entry(week_start_monday(shift.date))
            .or_default()
            .push(shift.clone());
    }
    groups
}

/// Prices a month of shifts week by week and sums the results.
///
/// Each calendar week gets its own fresh allowance (and its own per-week
/// bonus dedup); the weekly results are then folded with `+`, which is
/// sound because [`PeriodResult`] addition is associative and commutative.
pub fn process_month_as_weeks(
    ctx: &PayContext<'_>,
    shifts: &[Shift],
    mode: AllocationMode,
) -> PeriodResult {
    group_by_week(shifts)
        .values()
        .fold(PeriodResult::default(), |acc, week| {
            acc + process_shifts(ctx, week, mode)
        })
}
