//! Aggregation of a group of shifts into a [`PeriodResult`].
//!
//! Weekly-mode shifts cannot be priced one at a time: overtime only starts
//! once the rolling weekly base-hour allowance is used up, so the allocator
//! walks the shifts in chronological order and consumes the allowance as it
//! goes. Daily-mode, bank-holiday and leave shifts are priced directly from
//! their own split.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{PayMode, PeriodResult, Shift};

use super::daily_split::{HoursSplit, split_paid_into_base_and_ot};
use super::night_bonus::{WeeklyBonusLedger, bonus_for_shift};
use super::period::week_start_monday;
use super::rate_profile::{ot_multiplier, shift_rate_profile};
use super::PayContext;

/// How the weekly base-hour allowance is scoped during aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationMode {
    /// One shared allowance for the whole group, taken from global settings.
    /// Used for the combined week view.
    Overall,
    /// An independent allowance per company, taken from each company's
    /// weekly hours. Used for per-company week breakdowns.
    PerCompany,
    /// No weekly allocation at all: each shift is priced from its own
    /// cached split, and per-week bonuses dedupe per calendar week. Used
    /// for the month view, whose overtime was already decided week by week.
    MonthOverall,
}

/// Prices a group of shifts into one additive result.
///
/// Shifts are processed in `(date, start)` order regardless of input order,
/// so the weekly allowance is consumed chronologically and the outcome is
/// insensitive to storage order.
///
/// # Example
///
/// ```
/// use worklog_engine::calculation::{AllocationMode, PayContext, process_shifts};
/// use worklog_engine::models::{Settings, Shift};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let settings = Settings::default();
/// let ctx = PayContext::new(&[], &settings);
///
/// let mut shift = Shift::new("shf_1", "", NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
/// shift.start = "08:00".to_string();
/// shift.finish = "18:00".to_string();
/// shift.worked = Decimal::from(10);
/// shift.breaks = Decimal::ONE;
/// shift.paid = Decimal::from(9);
///
/// let result = process_shifts(&ctx, &[shift], AllocationMode::Overall);
/// assert_eq!(result.paid, Decimal::from(9));
/// assert_eq!(result.ot_hours, Decimal::ZERO); // well under 45h
/// ```
pub fn process_shifts(
    ctx: &PayContext<'_>,
    shifts: &[Shift],
    mode: AllocationMode,
) -> PeriodResult {
    let mut result = PeriodResult::default();
    let mut ledger = WeeklyBonusLedger::new();

    let mut ordered: Vec<&Shift> = shifts.iter().collect();
    ordered.sort_by(|a, b| (a.date, a.start.as_str()).cmp(&(b.date, b.start.as_str())));

    for shift in &ordered {
        result.worked += shift.worked.max(Decimal::ZERO);
        result.breaks += shift.breaks.max(Decimal::ZERO);
        result.paid += shift.paid.max(Decimal::ZERO);
        result.expense_total += shift.expenses.total();
        result.night_out_count += shift.night_out_count;
        result.night_out_pay += shift.night_out_pay;
    }

    // Weekly-mode shifts wait for the allowance pass; everything else is
    // priced as it is seen.
    let mut deferred: Vec<&Shift> = Vec::new();

    for shift in &ordered {
        let week = match mode {
            AllocationMode::MonthOverall => Some(week_start_monday(shift.date)),
            _ => None,
        };
        let outcome = bonus_for_shift(shift, ctx.company_for(shift), week, &mut ledger);
        result.night_hours += outcome.bonus_hours;
        result.night_pay += outcome.bonus_pay;

        let profile = shift_rate_profile(ctx, shift);
        let paid = shift.paid.max(Decimal::ZERO);

        if shift.bank_holiday {
            result.ot_pay += paid * profile.base_rate * ot_multiplier(shift, &profile);
            result.ot_hours += paid;
            continue;
        }

        if shift.is_leave() {
            result.base_pay += paid * profile.base_rate;
            continue;
        }

        let pay_mode = shift
            .overrides
            .pay_mode
            .or(ctx.company_for(shift).map(|c| c.pay_mode))
            .unwrap_or_default();

        if pay_mode == PayMode::Daily || mode == AllocationMode::MonthOverall {
            let split = split_for(ctx, shift);
            result.base_pay += split.base_hours * profile.base_rate;
            result.ot_pay += split.ot_hours * profile.base_rate * ot_multiplier(shift, &profile);
            result.ot_hours += split.ot_hours;
            continue;
        }

        deferred.push(shift);
    }

    match mode {
        AllocationMode::MonthOverall => {}
        AllocationMode::Overall => {
            let mut remaining = ctx.settings().base_hours.max(Decimal::ZERO);
            for shift in deferred {
                allocate_weekly(ctx, shift, &mut remaining, &mut result);
            }
        }
        AllocationMode::PerCompany => {
            let mut remaining: HashMap<&str, Decimal> = HashMap::new();
            for shift in deferred {
                let allowance = remaining
                    .entry(shift.company_id.as_str())
                    .or_insert_with(|| ctx.weekly_base_hours(&shift.company_id).max(Decimal::ZERO));
                allocate_weekly(ctx, shift, allowance, &mut result);
            }
        }
    }

    result.total = result.base_pay + result.ot_pay + result.night_pay + result.night_out_pay;
    result
}

/// Consumes the rolling allowance for one weekly-mode shift and prices the
/// base and excess portions.
fn allocate_weekly(
    ctx: &PayContext<'_>,
    shift: &Shift,
    remaining: &mut Decimal,
    result: &mut PeriodResult,
) {
    let profile = shift_rate_profile(ctx, shift);
    let paid = shift.paid.max(Decimal::ZERO);

    let base = paid.min((*remaining).max(Decimal::ZERO));
    let excess = paid - base;
    *remaining -= base;

    result.base_pay += base * profile.base_rate;
    result.ot_pay += excess * profile.base_rate * ot_multiplier(shift, &profile);
    result.ot_hours += excess;
}

/// Returns a shift's base/overtime split, preferring the cached values
/// computed at save time and recomputing only for legacy records.
fn split_for(ctx: &PayContext<'_>, shift: &Shift) -> HoursSplit {
    match (shift.base_hours, shift.ot_hours) {
        (Some(base_hours), Some(ot_hours)) => HoursSplit {
            base_hours,
            ot_hours,
        },
        _ => split_paid_into_base_and_ot(ctx, shift),
    }
}
