//! Pay-policy resolution: which rate and multipliers apply to a shift.
//!
//! Every policy field resolves through the same three-tier chain:
//! shift override → company value → global settings, with a hard default at
//! the end (0 for rates, 1 for multipliers). A shift whose `company_id` is
//! unset or dangling simply skips the middle tier.

use rust_decimal::Decimal;

use crate::models::{Company, OtMultipliers, Shift};

use super::PayContext;

/// The effective rate and overtime multipliers for one shift after
/// three-tier resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateProfile {
    /// Hourly rate in currency.
    pub base_rate: Decimal,
    /// Overtime multipliers by day type.
    pub ot: OtMultipliers,
}

/// Resolves one policy field through the override chain.
///
/// The first tier that is *present* wins, even if its value is zero: a
/// company that explicitly configures a zero rate is honoured, not skipped.
///
/// # Example
///
/// ```
/// use worklog_engine::calculation::resolve;
/// use rust_decimal::Decimal;
///
/// let fallback = Decimal::from(10);
/// assert_eq!(resolve(Some(Decimal::from(20)), Some(Decimal::from(15)), fallback), Decimal::from(20));
/// assert_eq!(resolve(None, Some(Decimal::ZERO), fallback), Decimal::ZERO);
/// assert_eq!(resolve(None, None, fallback), Decimal::from(10));
/// ```
pub fn resolve(
    override_val: Option<Decimal>,
    company_val: Option<Decimal>,
    fallback: Decimal,
) -> Decimal {
    override_val.or(company_val).unwrap_or(fallback)
}

/// Resolves the effective rate profile for a shift.
///
/// # Example
///
/// ```
/// use worklog_engine::calculation::{PayContext, shift_rate_profile};
/// use worklog_engine::models::{Company, Settings, Shift};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut company = Company::new("cmp_a", "Acme Haulage");
/// company.base_rate = Decimal::new(1950, 2); // 19.50
/// let companies = vec![company];
/// let settings = Settings::default();
/// let ctx = PayContext::new(&companies, &settings);
///
/// let shift = Shift::new("shf_1", "cmp_a", NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
/// let profile = shift_rate_profile(&ctx, &shift);
/// assert_eq!(profile.base_rate, Decimal::new(1950, 2));
///
/// // A dangling company reference degrades to settings-only resolution.
/// let orphan = Shift::new("shf_2", "cmp_gone", NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
/// assert_eq!(shift_rate_profile(&ctx, &orphan).base_rate, settings.base_rate);
/// ```
pub fn shift_rate_profile(ctx: &PayContext<'_>, shift: &Shift) -> RateProfile {
    let company: Option<&Company> = ctx.company_for(shift);
    let settings = ctx.settings();
    let o = &shift.overrides;

    RateProfile {
        base_rate: resolve(
            o.base_rate,
            company.map(|c| c.base_rate),
            settings.base_rate,
        ),
        ot: OtMultipliers {
            weekday: resolve(
                o.ot_weekday,
                company.map(|c| c.ot.weekday),
                settings.ot_weekday,
            ),
            saturday: resolve(
                o.ot_saturday,
                company.map(|c| c.ot.saturday),
                settings.ot_saturday,
            ),
            sunday: resolve(
                o.ot_sunday,
                company.map(|c| c.ot.sunday),
                settings.ot_sunday,
            ),
            bank_holiday: resolve(
                o.ot_bank_holiday,
                company.map(|c| c.ot.bank_holiday),
                settings.ot_bank_holiday,
            ),
        },
    }
}

/// Picks the overtime multiplier that applies to a shift.
///
/// The bank-holiday flag always wins, even when the date also falls on a
/// weekend; otherwise the multiplier follows the weekday of the shift date.
pub fn ot_multiplier(shift: &Shift, profile: &RateProfile) -> Decimal {
    if shift.bank_holiday {
        return profile.ot.bank_holiday;
    }

    match shift.weekday() {
        chrono::Weekday::Sat => profile.ot.saturday,
        chrono::Weekday::Sun => profile.ot.sunday,
        _ => profile.ot.weekday,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Settings;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn company_with_rates() -> Company {
        let mut company = Company::new("cmp_a", "Acme Haulage");
        company.base_rate = dec("19.50");
        company.ot = OtMultipliers {
            weekday: dec("1.3"),
            saturday: dec("1.4"),
            sunday: dec("1.6"),
            bank_holiday: dec("2.5"),
        };
        company
    }

    #[test]
    fn test_shift_override_outranks_company_and_settings() {
        let companies = vec![company_with_rates()];
        let settings = Settings::default();
        let ctx = PayContext::new(&companies, &settings);

        let mut shift = Shift::new("shf_1", "cmp_a", make_date("2026-01-15"));
        shift.overrides.base_rate = Some(dec("25"));
        shift.overrides.ot_sunday = Some(dec("3"));

        let profile = shift_rate_profile(&ctx, &shift);
        assert_eq!(profile.base_rate, dec("25"));
        assert_eq!(profile.ot.sunday, dec("3"));
        // Non-overridden fields still come from the company.
        assert_eq!(profile.ot.weekday, dec("1.3"));
    }

    #[test]
    fn test_company_outranks_settings() {
        let companies = vec![company_with_rates()];
        let settings = Settings::default();
        let ctx = PayContext::new(&companies, &settings);

        let shift = Shift::new("shf_1", "cmp_a", make_date("2026-01-15"));
        let profile = shift_rate_profile(&ctx, &shift);

        assert_eq!(profile.base_rate, dec("19.50"));
        assert_eq!(profile.ot.bank_holiday, dec("2.5"));
    }

    #[test]
    fn test_missing_company_falls_through_to_settings() {
        let companies: Vec<Company> = vec![];
        let settings = Settings::default();
        let ctx = PayContext::new(&companies, &settings);

        let shift = Shift::new("shf_1", "", make_date("2026-01-15"));
        let profile = shift_rate_profile(&ctx, &shift);

        assert_eq!(profile.base_rate, settings.base_rate);
        assert_eq!(profile.ot.weekday, settings.ot_weekday);
    }

    #[test]
    fn test_weekday_multiplier_selection() {
        let companies = vec![company_with_rates()];
        let settings = Settings::default();
        let ctx = PayContext::new(&companies, &settings);

        // 2026-01-15 is a Thursday, 2026-01-17 a Saturday, 2026-01-18 a Sunday.
        let cases = [
            ("2026-01-15", dec("1.3")),
            ("2026-01-17", dec("1.4")),
            ("2026-01-18", dec("1.6")),
        ];

        for (date, expected) in cases {
            let shift = Shift::new("shf_1", "cmp_a", make_date(date));
            let profile = shift_rate_profile(&ctx, &shift);
            assert_eq!(ot_multiplier(&shift, &profile), expected, "date {date}");
        }
    }

    #[test]
    fn test_bank_holiday_wins_over_weekend() {
        let companies = vec![company_with_rates()];
        let settings = Settings::default();
        let ctx = PayContext::new(&companies, &settings);

        // A Sunday that is also flagged as a bank holiday.
        let mut shift = Shift::new("shf_1", "cmp_a", make_date("2026-01-18"));
        shift.bank_holiday = true;

        let profile = shift_rate_profile(&ctx, &shift);
        assert_eq!(ot_multiplier(&shift, &profile), dec("2.5"));
    }

    #[test]
    fn test_resolve_keeps_explicit_zero() {
        assert_eq!(resolve(Some(Decimal::ZERO), None, dec("10")), Decimal::ZERO);
        assert_eq!(resolve(None, Some(Decimal::ZERO), dec("10")), Decimal::ZERO);
    }
}
