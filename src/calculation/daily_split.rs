//! Minimum-paid floor and the per-shift base/overtime split.
//!
//! The split decides how a shift's paid hours divide into base and overtime
//! *at the shift level*. Weekly-mode shifts come out as all-base here: their
//! real overtime is decided later by the weekly allocator, which works
//! across a whole group of shifts (see [`super::weekly_allocation`]).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{PayMode, Shift};

use super::PayContext;
use super::rate_profile::resolve;

/// Hard-default daily overtime threshold in worked hours, used when neither
/// the shift, the daily-overtime setting nor the company's standard shift
/// length provides one.
pub const DEFAULT_DAILY_OT_THRESHOLD: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// The division of a shift's paid hours into base and overtime shares.
///
/// Invariant: `base_hours + ot_hours` equals the shift's paid hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursSplit {
    /// Paid hours priced at the standard rate.
    pub base_hours: Decimal,
    /// Paid hours priced at the overtime multiplier.
    pub ot_hours: Decimal,
}

/// Applies the minimum-paid-shift floor and returns the effective paid
/// hours.
///
/// The floor (shift override → company) only ever raises `paid`; leave and
/// sick days are exempt because their paid hours are fixed policy.
pub fn apply_min_paid_floor(ctx: &PayContext<'_>, shift: &Shift) -> Decimal {
    let paid = shift.paid.max(Decimal::ZERO);
    if shift.is_leave() {
        return paid;
    }

    let min_paid = resolve(
        shift.overrides.min_paid_shift_hours,
        ctx.company_for(shift).map(|c| c.min_paid_shift_hours),
        Decimal::ZERO,
    )
    .max(Decimal::ZERO);

    if min_paid > Decimal::ZERO {
        paid.max(min_paid)
    } else {
        paid
    }
}

/// Splits a shift's paid hours into base and overtime shares.
///
/// Decision order (first match wins):
///
/// 1. Bank holiday: the entire paid amount is overtime, in every pay mode.
/// 2. Annual leave / sick day: all base, never overtime.
/// 3. Weekly pay mode: all base at this stage; the weekly allocator decides
///    the real overtime across the whole week.
/// 4. Daily mode: overtime starts after a worked-hours threshold resolved
///    as shift override → company daily threshold → company standard shift
///    length → 10 hours.
///
/// In the daily case the overtime share is capped twice: it cannot exceed
/// the paid hours, nor the nominal worked overtime, so the fixed break hour
/// never inflates overtime.
///
/// # Example
///
/// ```
/// use worklog_engine::calculation::{PayContext, split_paid_into_base_and_ot};
/// use worklog_engine::models::{Company, PayMode, Settings, Shift};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut company = Company::new("cmp_a", "Acme Haulage");
/// company.pay_mode = PayMode::Daily;
/// company.daily_ot_after_worked_hours = Decimal::from(10);
/// let companies = vec![company];
/// let settings = Settings::default();
/// let ctx = PayContext::new(&companies, &settings);
///
/// let mut shift = Shift::new("shf_1", "cmp_a", NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
/// shift.worked = Decimal::from(12);
/// shift.paid = Decimal::from(11);
///
/// let split = split_paid_into_base_and_ot(&ctx, &shift);
/// assert_eq!(split.base_hours, Decimal::from(9));
/// assert_eq!(split.ot_hours, Decimal::from(2));
/// ```
pub fn split_paid_into_base_and_ot(ctx: &PayContext<'_>, shift: &Shift) -> HoursSplit {
    let company = ctx.company_for(shift);
    let paid = shift.paid.max(Decimal::ZERO);
    let worked = shift.worked.max(Decimal::ZERO);

    if shift.bank_holiday {
        return HoursSplit {
            base_hours: Decimal::ZERO,
            ot_hours: paid,
        };
    }

    if shift.is_leave() {
        return HoursSplit {
            base_hours: paid,
            ot_hours: Decimal::ZERO,
        };
    }

    let pay_mode = shift
        .overrides
        .pay_mode
        .or(company.map(|c| c.pay_mode))
        .unwrap_or_default();

    if pay_mode != PayMode::Daily {
        return HoursSplit {
            base_hours: paid,
            ot_hours: Decimal::ZERO,
        };
    }

    let mut threshold = resolve(
        shift.overrides.daily_ot_after_worked_hours,
        company.map(|c| c.daily_ot_after_worked_hours),
        Decimal::ZERO,
    )
    .max(Decimal::ZERO);

    if threshold <= Decimal::ZERO {
        threshold = company
            .map(|c| c.standard_shift_length)
            .filter(|v| *v > Decimal::ZERO)
            .unwrap_or(DEFAULT_DAILY_OT_THRESHOLD);
    }

    if threshold <= Decimal::ZERO {
        return HoursSplit {
            base_hours: paid,
            ot_hours: Decimal::ZERO,
        };
    }

    let ot_worked = (worked - threshold).max(Decimal::ZERO);
    let ot_paid = paid.min(ot_worked);

    HoursSplit {
        base_hours: (paid - ot_paid).max(Decimal::ZERO),
        ot_hours: ot_paid,
    }
}
