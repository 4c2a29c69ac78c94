//! Payslip-style period summaries.
//!
//! A [`PayslipSummary`] is the serializable report the engine hands to a
//! renderer or exporter: overall totals for the period, a per-company
//! breakdown and one line per shift with an estimated pay figure.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{BonusRule, NightBonusMode, PeriodResult, Shift};

use super::daily_split::split_paid_into_base_and_ot;
use super::night_bonus::night_hours_for_shift;
use super::period::{group_by_company, month_range, shifts_in_range, week_range};
use super::rate_profile::{ot_multiplier, shift_rate_profile};
use super::weekly_allocation::{AllocationMode, process_shifts};
use super::PayContext;

/// The reporting period of a payslip summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    /// One Monday-Sunday week.
    Week,
    /// One calendar month.
    Month,
}

/// One shift row on the payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftLine {
    /// Shift date.
    pub date: NaiveDate,
    /// Owning company id; empty when unattributed.
    pub company_id: String,
    /// Owning company name; empty when the reference dangles.
    pub company_name: String,
    /// Start time as recorded.
    pub start: String,
    /// Finish time as recorded.
    pub finish: String,
    /// Worked hours.
    pub worked: Decimal,
    /// Break hours.
    pub breaks: Decimal,
    /// Paid hours.
    pub paid: Decimal,
    /// Estimated pay for this shift alone. Per-week bonuses are excluded
    /// (they cannot be attributed to a single line) but still appear in
    /// the period totals.
    pub estimated_pay: Decimal,
}

/// Totals for one company within the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyBreakdown {
    /// Company id.
    pub company_id: String,
    /// Company display name.
    pub company_name: String,
    /// Summed result for the company's shifts in the period.
    pub result: PeriodResult,
}

/// A complete period summary, ready for rendering or export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayslipSummary {
    /// Unique id for this report.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Version of the engine that produced the figures.
    pub engine_version: String,
    /// Week or month.
    pub period: ReportPeriod,
    /// First day of the period, inclusive.
    pub period_start: NaiveDate,
    /// Last day of the period, inclusive.
    pub period_end: NaiveDate,
    /// Totals across every shift in the period.
    pub overall: PeriodResult,
    /// Per-company totals, in company-id order.
    pub by_company: Vec<CompanyBreakdown>,
    /// One row per shift, in `(date, start)` order.
    pub lines: Vec<ShiftLine>,
}

/// Builds a payslip summary for the period containing `reference_date`.
///
/// Week reports allocate weekly overtime across the whole week (one shared
/// allowance for the overall figure, per-company allowances for the
/// breakdown). Month reports price each shift from its own split, since
/// the month's overtime was already decided week by week.
///
/// # Example
///
/// ```
/// use worklog_engine::calculation::{PayContext, ReportPeriod, build_payslip};
/// use worklog_engine::models::Settings;
/// use chrono::NaiveDate;
///
/// let settings = Settings::default();
/// let ctx = PayContext::new(&[], &settings);
/// let reference = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
///
/// let payslip = build_payslip(&ctx, &[], ReportPeriod::Week, reference);
/// assert_eq!(payslip.period_start, NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
/// assert_eq!(payslip.period_end, NaiveDate::from_ymd_opt(2026, 1, 18).unwrap());
/// assert!(payslip.lines.is_empty());
/// ```
pub fn build_payslip(
    ctx: &PayContext<'_>,
    shifts: &[Shift],
    period: ReportPeriod,
    reference_date: NaiveDate,
) -> PayslipSummary {
    let (period_start, period_end) = match period {
        ReportPeriod::Week => week_range(reference_date),
        ReportPeriod::Month => month_range(reference_date),
    };

    let period_shifts = shifts_in_range(shifts, period_start, period_end);

    let (overall_mode, company_mode) = match period {
        ReportPeriod::Week => (AllocationMode::Overall, AllocationMode::PerCompany),
        ReportPeriod::Month => (AllocationMode::MonthOverall, AllocationMode::MonthOverall),
    };

    let overall = process_shifts(ctx, &period_shifts, overall_mode);

    let by_company = group_by_company(&period_shifts)
        .into_iter()
        .map(|(company_id, group)| {
            let company_name = ctx
                .company(&company_id)
                .map(|c| c.name.clone())
                .unwrap_or_default();
            CompanyBreakdown {
                company_id,
                company_name,
                result: process_shifts(ctx, &group, company_mode),
            }
        })
        .collect();

    let mut ordered: Vec<&Shift> = period_shifts.iter().collect();
    ordered.sort_by(|a, b| (a.date, a.start.as_str()).cmp(&(b.date, b.start.as_str())));
    let lines = ordered
        .into_iter()
        .map(|shift| shift_line(ctx, shift))
        .collect();

    tracing::debug!(
        ?period,
        %period_start,
        %period_end,
        shifts = period_shifts.len(),
        "built payslip summary"
    );

    PayslipSummary {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        period,
        period_start,
        period_end,
        overall,
        by_company,
        lines,
    }
}

fn shift_line(ctx: &PayContext<'_>, shift: &Shift) -> ShiftLine {
    let profile = shift_rate_profile(ctx, shift);
    let mult = ot_multiplier(shift, &profile);
    let paid = shift.paid.max(Decimal::ZERO);

    let mut pay = if shift.bank_holiday {
        paid * profile.base_rate * mult
    } else {
        let (base_hours, ot_hours) = match (shift.base_hours, shift.ot_hours) {
            (Some(base), Some(ot)) => (base, ot),
            _ => {
                let split = split_paid_into_base_and_ot(ctx, shift);
                (split.base_hours, split.ot_hours)
            }
        };
        base_hours * profile.base_rate + ot_hours * profile.base_rate * mult
    };

    if let Some(rule) = ctx.company_for(shift).and_then(|c| c.primary_bonus_rule()) {
        match rule {
            BonusRule::None => {}
            BonusRule::PerShiftFlat { amount } => {
                if !shift.is_leave() && paid > Decimal::ZERO {
                    pay += *amount;
                }
            }
            BonusRule::NightWindow {
                mode,
                amount,
                start,
                end,
            } => {
                let night_hours = night_hours_for_shift(
                    &shift.start,
                    &shift.finish,
                    start,
                    end,
                    shift.is_leave(),
                );
                match mode {
                    NightBonusMode::PerHour => pay += night_hours * *amount,
                    NightBonusMode::PerShift => {
                        if night_hours > Decimal::ZERO {
                            pay += *amount;
                        }
                    }
                    // Per-week bonuses stay out of line pay.
                    NightBonusMode::PerWeek => {}
                }
            }
        }
    }

    pay += shift.night_out_pay;

    let company_name = ctx
        .company_for(shift)
        .map(|c| c.name.clone())
        .unwrap_or_default();

    ShiftLine {
        date: shift.date,
        company_id: shift.company_id.clone(),
        company_name,
        start: shift.start.clone(),
        finish: shift.finish.clone(),
        worked: shift.worked,
        breaks: shift.breaks,
        paid,
        estimated_pay: pay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::recompute_shift;
    use crate::models::{Company, Settings};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn rated_company(id: &str, name: &str, rate: &str) -> Company {
        let mut company = Company::new(id, name);
        company.base_rate = dec(rate);
        company.base_weekly_hours = dec("45");
        company
    }

    fn timed_shift(id: &str, company_id: &str, date: &str, ctx: &PayContext<'_>) -> Shift {
        let mut shift = Shift::new(id, company_id, make_date(date));
        shift.start = "08:00".to_string();
        shift.finish = "18:00".to_string();
        recompute_shift(&mut shift, ctx);
        shift
    }

    #[test]
    fn test_week_payslip_filters_and_orders_lines() {
        let companies = vec![rated_company("cmp_a", "Acme Haulage", "10")];
        let settings = Settings::default();
        let ctx = PayContext::new(&companies, &settings);

        let shifts = vec![
            timed_shift("shf_3", "cmp_a", "2026-01-14", &ctx),
            timed_shift("shf_1", "cmp_a", "2026-01-12", &ctx),
            // Outside the week of Jan 12.
            timed_shift("shf_out", "cmp_a", "2026-01-19", &ctx),
        ];

        let payslip = build_payslip(&ctx, &shifts, ReportPeriod::Week, make_date("2026-01-15"));

        assert_eq!(payslip.period_start, make_date("2026-01-12"));
        assert_eq!(payslip.period_end, make_date("2026-01-18"));
        assert_eq!(payslip.lines.len(), 2);
        assert_eq!(payslip.lines[0].date, make_date("2026-01-12"));
        assert_eq!(payslip.lines[1].date, make_date("2026-01-14"));
        assert_eq!(payslip.lines[0].company_name, "Acme Haulage");
        // 9 paid hours at 10, no overtime in a 18h week.
        assert_eq!(payslip.lines[0].estimated_pay, dec("90"));
    }

    #[test]
    fn test_week_payslip_overall_and_breakdown_modes() {
        let companies = vec![
            rated_company("cmp_a", "Acme Haulage", "10"),
            rated_company("cmp_b", "Borough Freight", "12"),
        ];
        let settings = Settings::default();
        let ctx = PayContext::new(&companies, &settings);

        let shifts = vec![
            timed_shift("shf_1", "cmp_a", "2026-01-12", &ctx),
            timed_shift("shf_2", "cmp_b", "2026-01-13", &ctx),
        ];

        let payslip = build_payslip(&ctx, &shifts, ReportPeriod::Week, make_date("2026-01-12"));

        assert_eq!(payslip.by_company.len(), 2);
        assert_eq!(payslip.by_company[0].company_id, "cmp_a");
        assert_eq!(payslip.by_company[0].result.base_pay, dec("90"));
        assert_eq!(payslip.by_company[1].result.base_pay, dec("108"));
        assert_eq!(payslip.overall.base_pay, dec("198"));
        assert_eq!(payslip.overall.paid, dec("18"));
    }

    #[test]
    fn test_month_payslip_covers_calendar_month() {
        let companies = vec![rated_company("cmp_a", "Acme Haulage", "10")];
        let settings = Settings::default();
        let ctx = PayContext::new(&companies, &settings);

        let shifts = vec![
            timed_shift("shf_1", "cmp_a", "2026-01-02", &ctx),
            timed_shift("shf_2", "cmp_a", "2026-01-30", &ctx),
            timed_shift("shf_out", "cmp_a", "2026-02-02", &ctx),
        ];

        let payslip = build_payslip(&ctx, &shifts, ReportPeriod::Month, make_date("2026-01-15"));

        assert_eq!(payslip.period_start, make_date("2026-01-01"));
        assert_eq!(payslip.period_end, make_date("2026-01-31"));
        assert_eq!(payslip.lines.len(), 2);
        assert_eq!(payslip.overall.paid, dec("18"));
    }

    #[test]
    fn test_bank_holiday_line_pay() {
        let mut company = rated_company("cmp_a", "Acme Haulage", "10");
        company.ot.bank_holiday = dec("2");
        let companies = vec![company];
        let settings = Settings::default();
        let ctx = PayContext::new(&companies, &settings);

        let mut shift = Shift::new("shf_bh", "cmp_a", make_date("2026-01-12"));
        shift.start = "08:00".to_string();
        shift.finish = "18:00".to_string();
        shift.bank_holiday = true;
        recompute_shift(&mut shift, &ctx);

        let payslip = build_payslip(&ctx, &[shift], ReportPeriod::Week, make_date("2026-01-12"));
        assert_eq!(payslip.lines[0].estimated_pay, dec("180"));
    }

    #[test]
    fn test_per_week_bonus_in_totals_but_not_lines() {
        let mut company = rated_company("cmp_n", "Night Freight", "10");
        company.bonus_rules = vec![BonusRule::NightWindow {
            mode: NightBonusMode::PerWeek,
            amount: dec("25"),
            start: "22:00".to_string(),
            end: "06:00".to_string(),
        }];
        let companies = vec![company];
        let settings = Settings::default();
        let ctx = PayContext::new(&companies, &settings);

        let mut shift = Shift::new("shf_n", "cmp_n", make_date("2026-01-12"));
        shift.start = "20:00".to_string();
        shift.finish = "06:00".to_string();
        recompute_shift(&mut shift, &ctx);

        let payslip = build_payslip(&ctx, &[shift], ReportPeriod::Week, make_date("2026-01-12"));

        assert_eq!(payslip.overall.night_pay, dec("25"));
        // The line shows only base pay: 9 paid hours at 10.
        assert_eq!(payslip.lines[0].estimated_pay, dec("90"));
    }

    #[test]
    fn test_night_out_pay_lands_on_its_line() {
        let companies = vec![rated_company("cmp_a", "Acme Haulage", "10")];
        let settings = Settings::default();
        let ctx = PayContext::new(&companies, &settings);

        let mut shift = timed_shift("shf_1", "cmp_a", "2026-01-12", &ctx);
        shift.night_out = true;
        shift.night_out_count = 1;
        shift.night_out_pay = dec("26");

        let payslip = build_payslip(&ctx, &[shift], ReportPeriod::Week, make_date("2026-01-12"));
        assert_eq!(payslip.lines[0].estimated_pay, dec("116"));
        assert_eq!(payslip.overall.night_out_pay, dec("26"));
    }

    #[test]
    fn test_payslip_serializes_camel_case() {
        let settings = Settings::default();
        let ctx = PayContext::new(&[], &settings);
        let payslip = build_payslip(&ctx, &[], ReportPeriod::Week, make_date("2026-01-12"));

        let json = serde_json::to_string(&payslip).unwrap();
        assert!(json.contains("\"periodStart\""));
        assert!(json.contains("\"engineVersion\""));
        assert!(json.contains("\"byCompany\""));
        assert!(json.contains("\"period\":\"week\""));
    }
}
