//! Night-window hour counting and bonus pricing.
//!
//! A company's primary bonus rule (see
//! [`Company::primary_bonus_rule`]) decides whether a shift earns
//! supplemental pay. Night-window rules count the shift hours that fall
//! inside a clock-time window; flat rules pay per shift. Per-week rules
//! additionally dedupe through a [`WeeklyBonusLedger`] owned by the
//! aggregation pass, so pricing stays a pure function of its inputs.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{BonusRule, Company, NightBonusMode, Shift};

use super::clock::{MINUTES_PER_DAY, minutes_to_hours, overlap_minutes, time_to_minutes};

/// Counts the hours of a shift that fall inside a night window.
///
/// Both the shift and the window are clock-time intervals that may cross
/// midnight (end at or before start). Each is unfolded onto a two-day
/// minute axis and the overlaps summed, so a 20:00-06:00 shift correctly
/// meets a 22:00-06:00 window on both sides of midnight.
///
/// Leave days and shifts with missing times count zero night hours.
///
/// # Examples
///
/// ```
/// use worklog_engine::calculation::night_hours_for_shift;
/// use rust_decimal::Decimal;
///
/// // 20:00-06:00 shift against a 22:00-06:00 window: 8 night hours.
/// let hours = night_hours_for_shift("20:00", "06:00", "22:00", "06:00", false);
/// assert_eq!(hours, Decimal::from(8));
///
/// // A day shift never touches the window.
/// let hours = night_hours_for_shift("08:00", "18:00", "22:00", "06:00", false);
/// assert_eq!(hours, Decimal::ZERO);
/// ```
pub fn night_hours_for_shift(
    start: &str,
    finish: &str,
    window_start: &str,
    window_end: &str,
    on_leave: bool,
) -> Decimal {
    if on_leave || start.trim().is_empty() || finish.trim().is_empty() {
        return Decimal::ZERO;
    }

    let s = time_to_minutes(start);
    let mut f = time_to_minutes(finish);
    if f <= s {
        f += MINUTES_PER_DAY;
    }

    let ws = time_to_minutes(window_start);
    let we = time_to_minutes(window_end);

    // The window repeats daily; checking today's and tomorrow's occurrence
    // covers every position of a shift on the two-day axis.
    let windows: [(i64, i64); 4] = if we > ws {
        [(ws, we), (ws + MINUTES_PER_DAY, we + MINUTES_PER_DAY), (0, 0), (0, 0)]
    } else {
        [
            (ws, MINUTES_PER_DAY),
            (0, we),
            (ws + MINUTES_PER_DAY, 2 * MINUTES_PER_DAY),
            (MINUTES_PER_DAY, we + MINUTES_PER_DAY),
        ]
    };

    let total: i64 = windows
        .iter()
        .map(|&(b_start, b_end)| overlap_minutes(s, f, b_start, b_end))
        .sum();

    minutes_to_hours(total)
}

/// The bonus contribution of one shift.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BonusOutcome {
    /// Bonus pay in currency.
    pub bonus_pay: Decimal,
    /// Night hours inside the window (zero for flat rules).
    pub bonus_hours: Decimal,
}

/// Tracks which per-week bonuses have already been paid during one
/// aggregation pass.
///
/// The key is (company, week start); passes that aggregate a single week
/// use `None` for the week component and dedupe per company only.
#[derive(Debug, Default)]
pub struct WeeklyBonusLedger {
    claimed: HashSet<(String, Option<NaiveDate>)>,
}

impl WeeklyBonusLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the per-week bonus for a (company, week) pair. Returns `true`
    /// on the first claim, `false` on every subsequent one.
    pub fn claim(&mut self, company_id: &str, week: Option<NaiveDate>) -> bool {
        self.claimed.insert((company_id.to_string(), week))
    }
}

/// Prices the bonus contribution of one shift under its company's primary
/// bonus rule.
///
/// `week` identifies the week the shift belongs to for per-week dedup; pass
/// `None` when the whole aggregation covers a single week.
pub fn bonus_for_shift(
    shift: &Shift,
    company: Option<&Company>,
    week: Option<NaiveDate>,
    ledger: &mut WeeklyBonusLedger,
) -> BonusOutcome {
    let Some(rule) = company.and_then(Company::primary_bonus_rule) else {
        return BonusOutcome::default();
    };

    match rule {
        BonusRule::None => BonusOutcome::default(),
        BonusRule::PerShiftFlat { amount } => {
            if !shift.is_leave() && shift.paid > Decimal::ZERO {
                BonusOutcome {
                    bonus_pay: *amount,
                    bonus_hours: Decimal::ZERO,
                }
            } else {
                BonusOutcome::default()
            }
        }
        BonusRule::NightWindow {
            mode,
            amount,
            start,
            end,
        } => {
            let night_hours =
                night_hours_for_shift(&shift.start, &shift.finish, start, end, shift.is_leave());
            if night_hours <= Decimal::ZERO {
                return BonusOutcome::default();
            }

            let bonus_pay = match mode {
                NightBonusMode::PerHour => night_hours * *amount,
                NightBonusMode::PerShift => *amount,
                NightBonusMode::PerWeek => {
                    if ledger.claim(&shift.company_id, week) {
                        *amount
                    } else {
                        Decimal::ZERO
                    }
                }
            };

            BonusOutcome {
                bonus_pay,
                bonus_hours: night_hours,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn night_company(mode: NightBonusMode, amount: &str) -> Company {
        let mut company = Company::new("cmp_n", "Night Freight");
        company.bonus_rules = vec![BonusRule::NightWindow {
            mode,
            amount: dec(amount),
            start: "22:00".to_string(),
            end: "06:00".to_string(),
        }];
        company
    }

    fn timed_shift(start: &str, finish: &str) -> Shift {
        let mut shift = Shift::new("shf_1", "cmp_n", make_date("2026-01-15"));
        shift.start = start.to_string();
        shift.finish = finish.to_string();
        shift.paid = dec("8");
        shift
    }

    /// 20:00-06:00 against a 22:00-06:00 window is 8 night hours.
    #[test]
    fn test_cross_midnight_shift_against_cross_midnight_window() {
        assert_eq!(
            night_hours_for_shift("20:00", "06:00", "22:00", "06:00", false),
            dec("8")
        );
    }

    #[test]
    fn test_day_shift_misses_window() {
        assert_eq!(
            night_hours_for_shift("08:00", "18:00", "22:00", "06:00", false),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_shift_inside_non_crossing_window() {
        // Window 18:00-23:00, shift 19:00-22:00: fully inside.
        assert_eq!(
            night_hours_for_shift("19:00", "22:00", "18:00", "23:00", false),
            dec("3")
        );
    }

    #[test]
    fn test_cross_midnight_shift_against_non_crossing_window() {
        // Shift 20:00-02:00, window 22:00-23:30 (same-day). Tonight's
        // occurrence overlaps 1.5h; tomorrow's is past the finish.
        assert_eq!(
            night_hours_for_shift("20:00", "02:00", "22:00", "23:30", false),
            dec("1.5")
        );
    }

    #[test]
    fn test_early_morning_shift_catches_tail_of_window() {
        // 04:00-12:00 overlaps 22:00-06:00 from 04:00 to 06:00.
        assert_eq!(
            night_hours_for_shift("04:00", "12:00", "22:00", "06:00", false),
            dec("2")
        );
    }

    #[test]
    fn test_midnight_symmetry() {
        // 23:00-01:00 is entirely inside 22:00-06:00, both hours counted.
        assert_eq!(
            night_hours_for_shift("23:00", "01:00", "22:00", "06:00", false),
            dec("2")
        );
    }

    #[test]
    fn test_leave_and_missing_times_count_zero() {
        assert_eq!(
            night_hours_for_shift("20:00", "06:00", "22:00", "06:00", true),
            Decimal::ZERO
        );
        assert_eq!(
            night_hours_for_shift("", "06:00", "22:00", "06:00", false),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_per_hour_bonus() {
        let company = night_company(NightBonusMode::PerHour, "0.50");
        let shift = timed_shift("20:00", "06:00");
        let mut ledger = WeeklyBonusLedger::new();

        let outcome = bonus_for_shift(&shift, Some(&company), None, &mut ledger);
        assert_eq!(outcome.bonus_hours, dec("8"));
        assert_eq!(outcome.bonus_pay, dec("4.00"));
    }

    #[test]
    fn test_per_shift_bonus_requires_window_contact() {
        let company = night_company(NightBonusMode::PerShift, "10");
        let mut ledger = WeeklyBonusLedger::new();

        let night = timed_shift("20:00", "06:00");
        assert_eq!(
            bonus_for_shift(&night, Some(&company), None, &mut ledger).bonus_pay,
            dec("10")
        );

        let day = timed_shift("08:00", "18:00");
        assert_eq!(
            bonus_for_shift(&day, Some(&company), None, &mut ledger).bonus_pay,
            Decimal::ZERO
        );
    }

    #[test]
    fn test_per_week_bonus_pays_once_per_company_week() {
        let company = night_company(NightBonusMode::PerWeek, "25");
        let mut ledger = WeeklyBonusLedger::new();
        let week1 = Some(make_date("2026-01-12"));
        let week2 = Some(make_date("2026-01-19"));

        let shift = timed_shift("20:00", "06:00");
        assert_eq!(
            bonus_for_shift(&shift, Some(&company), week1, &mut ledger).bonus_pay,
            dec("25")
        );
        // Second night in the same week: hours still counted, no more pay.
        let outcome = bonus_for_shift(&shift, Some(&company), week1, &mut ledger);
        assert_eq!(outcome.bonus_pay, Decimal::ZERO);
        assert_eq!(outcome.bonus_hours, dec("8"));
        // A new week claims again.
        assert_eq!(
            bonus_for_shift(&shift, Some(&company), week2, &mut ledger).bonus_pay,
            dec("25")
        );
    }

    #[test]
    fn test_per_week_dedup_is_per_company() {
        let company_a = night_company(NightBonusMode::PerWeek, "25");
        let mut company_b = night_company(NightBonusMode::PerWeek, "30");
        company_b.id = "cmp_b".to_string();

        let mut ledger = WeeklyBonusLedger::new();
        let week = Some(make_date("2026-01-12"));

        let shift_a = timed_shift("20:00", "06:00");
        let mut shift_b = timed_shift("20:00", "06:00");
        shift_b.company_id = "cmp_b".to_string();

        assert_eq!(
            bonus_for_shift(&shift_a, Some(&company_a), week, &mut ledger).bonus_pay,
            dec("25")
        );
        assert_eq!(
            bonus_for_shift(&shift_b, Some(&company_b), week, &mut ledger).bonus_pay,
            dec("30")
        );
    }

    #[test]
    fn test_flat_per_shift_rule_ignores_window() {
        let mut company = Company::new("cmp_f", "Flat Co");
        company.bonus_rules = vec![BonusRule::PerShiftFlat { amount: dec("7") }];
        let mut ledger = WeeklyBonusLedger::new();

        let mut day = timed_shift("08:00", "18:00");
        day.company_id = "cmp_f".to_string();
        let outcome = bonus_for_shift(&day, Some(&company), None, &mut ledger);
        assert_eq!(outcome.bonus_pay, dec("7"));
        assert_eq!(outcome.bonus_hours, Decimal::ZERO);
    }

    #[test]
    fn test_flat_rule_skips_leave_and_unpaid_shifts() {
        let mut company = Company::new("cmp_f", "Flat Co");
        company.bonus_rules = vec![BonusRule::PerShiftFlat { amount: dec("7") }];
        let mut ledger = WeeklyBonusLedger::new();

        let mut leave = timed_shift("08:00", "18:00");
        leave.annual_leave = true;
        assert_eq!(
            bonus_for_shift(&leave, Some(&company), None, &mut ledger).bonus_pay,
            Decimal::ZERO
        );

        let mut unpaid = timed_shift("", "");
        unpaid.paid = Decimal::ZERO;
        assert_eq!(
            bonus_for_shift(&unpaid, Some(&company), None, &mut ledger).bonus_pay,
            Decimal::ZERO
        );
    }

    #[test]
    fn test_no_company_or_no_rule_is_zero() {
        let mut ledger = WeeklyBonusLedger::new();
        let shift = timed_shift("20:00", "06:00");

        assert_eq!(
            bonus_for_shift(&shift, None, None, &mut ledger),
            BonusOutcome::default()
        );

        let bare = Company::new("cmp_bare", "No Bonus Ltd");
        assert_eq!(
            bonus_for_shift(&shift, Some(&bare), None, &mut ledger),
            BonusOutcome::default()
        );
    }
}
