//! Aggregate pay result for a period of shifts.
//!
//! [`PeriodResult`] is additive: combining results with `+` is associative
//! and commutative, which is what makes week-of-month accumulation correct
//! (sum the per-week results rather than re-running allocation across the
//! whole month).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// The summed outcome of pricing a group of shifts.
///
/// Produced by [`process_shifts`] and folded across weeks by
/// [`process_month_as_weeks`]. Note that `expense_total` is *not* part of
/// `total`; expenses are reported separately and subtracted for a "net"
/// figure by the consumer.
///
/// [`process_shifts`]: crate::calculation::process_shifts
/// [`process_month_as_weeks`]: crate::calculation::process_month_as_weeks
///
/// # Example
///
/// ```
/// use worklog_engine::models::PeriodResult;
/// use rust_decimal::Decimal;
///
/// let a = PeriodResult { paid: Decimal::from(9), ..Default::default() };
/// let b = PeriodResult { paid: Decimal::from(8), ..Default::default() };
/// assert_eq!((a + b).paid, Decimal::from(17));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PeriodResult {
    /// Total worked hours.
    pub worked: Decimal,
    /// Total break hours.
    pub breaks: Decimal,
    /// Total paid hours.
    pub paid: Decimal,
    /// Paid hours priced as overtime.
    pub ot_hours: Decimal,
    /// Pay for base hours at the standard rate.
    pub base_pay: Decimal,
    /// Pay for overtime hours at the multiplied rate.
    pub ot_pay: Decimal,
    /// Hours that fell inside an active night-bonus window.
    pub night_hours: Decimal,
    /// Bonus pay from the active bonus rules.
    pub night_pay: Decimal,
    /// Summed expenses; excluded from `total`.
    pub expense_total: Decimal,
    /// Number of nights out.
    pub night_out_count: u32,
    /// Flat pay for nights out.
    pub night_out_pay: Decimal,
    /// `base_pay + ot_pay + night_pay + night_out_pay`.
    pub total: Decimal,
}

impl PeriodResult {
    /// Base hours implied by the totals: `max(0, paid - ot_hours)`.
    pub fn base_hours(&self) -> Decimal {
        (self.paid - self.ot_hours).max(Decimal::ZERO)
    }

    /// Net figure after expenses: `total - expense_total`.
    pub fn net_of_expenses(&self) -> Decimal {
        self.total - self.expense_total
    }
}

impl Add for PeriodResult {
    type Output = PeriodResult;

    fn add(self, rhs: PeriodResult) -> PeriodResult {
        PeriodResult {
            worked: self.worked + rhs.worked,
            breaks: self.breaks + rhs.breaks,
            paid: self.paid + rhs.paid,
            ot_hours: self.ot_hours + rhs.ot_hours,
            base_pay: self.base_pay + rhs.base_pay,
            ot_pay: self.ot_pay + rhs.ot_pay,
            night_hours: self.night_hours + rhs.night_hours,
            night_pay: self.night_pay + rhs.night_pay,
            expense_total: self.expense_total + rhs.expense_total,
            night_out_count: self.night_out_count + rhs.night_out_count,
            night_out_pay: self.night_out_pay + rhs.night_out_pay,
            total: self.total + rhs.total,
        }
    }
}

impl AddAssign for PeriodResult {
    fn add_assign(&mut self, rhs: PeriodResult) {
        *self = self.clone() + rhs;
    }
}
