//! Calculation logic for the work-log engine.
//!
//! This module contains the pure pay computation pipeline: clock arithmetic,
//! worked/paid hour calculation, three-tier rate resolution, the daily
//! base/overtime split, night-window bonus pricing, the weekly overtime
//! allocator, and the period aggregation that feeds summaries and payslips.
//!
//! Nothing in here touches storage or I/O: every function is a deterministic
//! transformation of `(shifts, companies, settings)` into result values.

mod clock;
mod daily_split;
mod night_bonus;
mod payslip;
mod period;
mod rate_profile;
mod shift_hours;
mod weekly_allocation;

pub use clock::{MINUTES_PER_DAY, minutes_to_hours, overlap_minutes, time_to_minutes};
pub use daily_split::{
    DEFAULT_DAILY_OT_THRESHOLD, HoursSplit, apply_min_paid_floor, split_paid_into_base_and_ot,
};
pub use night_bonus::{BonusOutcome, WeeklyBonusLedger, bonus_for_shift, night_hours_for_shift};
pub use payslip::{CompanyBreakdown, PayslipSummary, ReportPeriod, ShiftLine, build_payslip};
pub use period::{
    group_by_company, group_by_week, month_range, process_month_as_weeks, shifts_in_range,
    week_range, week_start_monday,
};
pub use rate_profile::{RateProfile, ot_multiplier, resolve, shift_rate_profile};
pub use shift_hours::{HoursBreakdown, LEAVE_DAY_HOURS, STANDARD_BREAK_HOURS, calculate_hours};
pub use weekly_allocation::{AllocationMode, process_shifts};

use rust_decimal::Decimal;

use crate::models::{Company, Settings, Shift};

/// Read-only view of the policy data the engine resolves against.
///
/// The engine has no ambient state: every entry point takes a `PayContext`
/// alongside the shifts it should price. Construct one from the company
/// list and settings held by whatever storage layer the caller uses.
///
/// # Example
///
/// ```
/// use worklog_engine::calculation::PayContext;
/// use worklog_engine::models::{Company, Settings};
///
/// let companies = vec![Company::new("cmp_a", "Acme Haulage")];
/// let settings = Settings::default();
/// let ctx = PayContext::new(&companies, &settings);
///
/// assert!(ctx.company("cmp_a").is_some());
/// assert!(ctx.company("cmp_missing").is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PayContext<'a> {
    companies: &'a [Company],
    settings: &'a Settings,
}

impl<'a> PayContext<'a> {
    /// Creates a context over the given companies and settings.
    pub fn new(companies: &'a [Company], settings: &'a Settings) -> Self {
        Self {
            companies,
            settings,
        }
    }

    /// Returns the global settings.
    pub fn settings(&self) -> &'a Settings {
        self.settings
    }

    /// Looks up a company by id. Empty or dangling ids yield `None`, which
    /// downstream resolution treats as "settings only".
    pub fn company(&self, id: &str) -> Option<&'a Company> {
        if id.is_empty() {
            return None;
        }
        self.companies.iter().find(|c| c.id == id)
    }

    /// Looks up the company a shift references.
    pub fn company_for(&self, shift: &Shift) -> Option<&'a Company> {
        self.company(&shift.company_id)
    }

    /// Returns the weekly base-hour allowance for a company: the company's
    /// `base_weekly_hours` when the company exists, otherwise the global
    /// settings `base_hours`.
    pub fn weekly_base_hours(&self, company_id: &str) -> Decimal {
        self.company(company_id)
            .map(|c| c.base_weekly_hours)
            .unwrap_or(self.settings.base_hours)
    }
}

/// Recomputes a shift's derived fields in place.
///
/// Run by the storage layer on every save so the cached values stay
/// consistent with the raw entry. The order is fixed: hours first, then the
/// break-hours override, then the minimum-paid floor, then the base/overtime
/// split (bonus pricing happens later, at aggregation time, against the
/// floored paid hours).
pub fn recompute_shift(shift: &mut Shift, ctx: &PayContext<'_>) {
    let hours = calculate_hours(&shift.start, &shift.finish, shift.is_leave());
    shift.worked = hours.worked;
    shift.breaks = hours.breaks;
    shift.paid = hours.paid;

    if !shift.is_leave() && shift.has_times() {
        if let Some(break_hours) = shift.overrides.break_hours {
            let break_hours = break_hours.max(Decimal::ZERO);
            shift.breaks = break_hours;
            shift.paid = (shift.worked - break_hours).max(Decimal::ZERO);
        }
    }

    shift.paid = apply_min_paid_floor(ctx, shift);

    let split = split_paid_into_base_and_ot(ctx, shift);
    shift.base_hours = Some(split.base_hours);
    shift.ot_hours = Some(split.ot_hours);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_recompute_plain_shift() {
        let companies = vec![Company::new("cmp_a", "Acme Haulage")];
        let settings = Settings::default();
        let ctx = PayContext::new(&companies, &settings);

        let mut shift = Shift::new("shf_001", "cmp_a", make_date("2026-01-15"));
        shift.start = "08:00".to_string();
        shift.finish = "18:00".to_string();

        recompute_shift(&mut shift, &ctx);

        assert_eq!(shift.worked, dec("10"));
        assert_eq!(shift.breaks, dec("1"));
        assert_eq!(shift.paid, dec("9"));
        // Weekly-mode company: split defers overtime to the allocator.
        assert_eq!(shift.base_hours, Some(dec("9")));
        assert_eq!(shift.ot_hours, Some(dec("0")));
    }

    #[test]
    fn test_recompute_applies_break_override() {
        let companies = vec![Company::new("cmp_a", "Acme Haulage")];
        let settings = Settings::default();
        let ctx = PayContext::new(&companies, &settings);

        let mut shift = Shift::new("shf_001", "cmp_a", make_date("2026-01-15"));
        shift.start = "08:00".to_string();
        shift.finish = "18:00".to_string();
        shift.overrides.break_hours = Some(dec("0.5"));

        recompute_shift(&mut shift, &ctx);

        assert_eq!(shift.worked, dec("10"));
        assert_eq!(shift.breaks, dec("0.5"));
        assert_eq!(shift.paid, dec("9.5"));
    }

    #[test]
    fn test_recompute_applies_min_paid_floor() {
        let mut company = Company::new("cmp_a", "Acme Haulage");
        company.min_paid_shift_hours = dec("8");
        let companies = vec![company];
        let settings = Settings::default();
        let ctx = PayContext::new(&companies, &settings);

        let mut shift = Shift::new("shf_001", "cmp_a", make_date("2026-01-15"));
        shift.start = "09:00".to_string();
        shift.finish = "13:00".to_string();

        recompute_shift(&mut shift, &ctx);

        assert_eq!(shift.worked, dec("4"));
        assert_eq!(shift.paid, dec("8"));
    }

    #[test]
    fn test_weekly_base_hours_falls_back_to_settings() {
        let mut company = Company::new("cmp_a", "Acme Haulage");
        company.base_weekly_hours = dec("50");
        let companies = vec![company];
        let settings = Settings::default();
        let ctx = PayContext::new(&companies, &settings);

        assert_eq!(ctx.weekly_base_hours("cmp_a"), dec("50"));
        assert_eq!(ctx.weekly_base_hours("cmp_gone"), settings.base_hours);
        assert_eq!(ctx.weekly_base_hours(""), settings.base_hours);
    }
}
