//! Shift model and related types.
//!
//! A [`Shift`] is one worked or leave day for one company. Clock times are
//! stored as `HH:MM` strings because the engine must tolerate malformed
//! historical data: parsing degrades to zero rather than failing (see
//! [`crate::calculation::clock`]).

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayMode;

/// Whether a shift was entered as a day or night shift.
///
/// Used only to bias default-date entry in a UI; it plays no role in any
/// pay calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    /// A daytime shift (default).
    #[default]
    Day,
    /// A night shift.
    Night,
}

/// Out-of-pocket expense amounts attached to a shift.
///
/// Expenses are summed into [`PeriodResult::expense_total`] but are
/// excluded from the pay `total` (shown separately, subtracted for "net").
///
/// [`PeriodResult::expense_total`]: super::PeriodResult::expense_total
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Expenses {
    /// Parking costs for the shift.
    pub parking: Decimal,
    /// Toll costs for the shift.
    pub tolls: Decimal,
}

impl Expenses {
    /// Returns the combined expense amount for the shift.
    pub fn total(&self) -> Decimal {
        self.parking + self.tolls
    }
}

/// Per-shift overrides of company or global pay policy.
///
/// Every field is optional; a set field always outranks both the owning
/// company's policy and the global settings (shift → company → settings
/// resolution, see [`crate::calculation::rate_profile`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShiftOverrides {
    /// Hourly rate override.
    pub base_rate: Option<Decimal>,
    /// Weekday overtime multiplier override.
    pub ot_weekday: Option<Decimal>,
    /// Saturday overtime multiplier override.
    pub ot_saturday: Option<Decimal>,
    /// Sunday overtime multiplier override.
    pub ot_sunday: Option<Decimal>,
    /// Bank-holiday overtime multiplier override.
    pub ot_bank_holiday: Option<Decimal>,
    /// Break hours override; when set, `paid = worked - break_hours`.
    pub break_hours: Option<Decimal>,
    /// Pay mode override (`weekly` or `daily`).
    pub pay_mode: Option<PayMode>,
    /// Daily overtime threshold override, in worked hours.
    #[serde(rename = "dailyOTAfterWorkedHours")]
    pub daily_ot_after_worked_hours: Option<Decimal>,
    /// Minimum paid shift hours override.
    pub min_paid_shift_hours: Option<Decimal>,
}

impl ShiftOverrides {
    /// Returns `true` when no override is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One worked or leave day for one company.
///
/// `company_id` is a foreign reference, not ownership: a dangling reference
/// degrades to settings-only rate resolution rather than failing. The
/// derived fields (`worked`, `breaks`, `paid`, `base_hours`, `ot_hours`) are
/// computed by the engine on every save and cached on the record; the
/// aggregation pipeline never mutates a shift.
///
/// # Example
///
/// ```
/// use worklog_engine::models::Shift;
/// use chrono::NaiveDate;
///
/// let shift = Shift::new(
///     "shf_001",
///     "cmp_abc",
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
/// );
/// assert!(!shift.is_leave());
/// assert!(!shift.has_times());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    /// Opaque shift id.
    pub id: String,
    /// Id of the owning company (foreign reference, may dangle).
    #[serde(default)]
    pub company_id: String,
    /// Calendar day of the shift.
    pub date: NaiveDate,
    /// Start clock time as `HH:MM`; empty means not recorded.
    #[serde(default)]
    pub start: String,
    /// Finish clock time as `HH:MM`; a finish at or before `start` means
    /// the shift crosses midnight.
    #[serde(default)]
    pub finish: String,
    /// Day or night shift (entry-form bias only).
    #[serde(default)]
    pub shift_type: ShiftType,
    /// Annual leave flag: forces a fixed 9-hour paid day.
    #[serde(default)]
    pub annual_leave: bool,
    /// Sick day flag: forces a fixed 9-hour paid day. Mutually exclusive
    /// with `annual_leave` (rejected at the entry boundary).
    #[serde(default)]
    pub sick_day: bool,
    /// Bank holiday flag: the whole paid shift is priced as overtime at
    /// the bank-holiday multiplier.
    #[serde(default)]
    pub bank_holiday: bool,
    /// Whether the driver stayed out overnight.
    #[serde(default)]
    pub night_out: bool,
    /// Number of nights out attached to this shift.
    #[serde(default)]
    pub night_out_count: u32,
    /// Flat pay for the nights out, added to the period total.
    #[serde(default)]
    pub night_out_pay: Decimal,
    /// Vehicle registration (pass-through).
    #[serde(default)]
    pub vehicle: String,
    /// First trailer id (pass-through).
    #[serde(default)]
    pub trailer1: String,
    /// Second trailer id (pass-through).
    #[serde(default)]
    pub trailer2: String,
    /// Odometer reading at start of shift.
    #[serde(default)]
    pub start_mileage: Decimal,
    /// Odometer reading at end of shift.
    #[serde(default)]
    pub finish_mileage: Decimal,
    /// Distance covered; backfilled as `max(0, finish - start)` on load.
    #[serde(default)]
    pub mileage: Decimal,
    /// Expense amounts for the shift.
    #[serde(default)]
    pub expenses: Expenses,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    /// Cached worked hours, recomputed on save.
    #[serde(default)]
    pub worked: Decimal,
    /// Cached break hours, recomputed on save.
    #[serde(default)]
    pub breaks: Decimal,
    /// Cached paid hours, recomputed on save (after the minimum-paid floor).
    #[serde(default)]
    pub paid: Decimal,
    /// Cached base-hour share of `paid`; `None` on legacy records, in which
    /// case the aggregation pipeline recomputes the split on the fly.
    #[serde(default)]
    pub base_hours: Option<Decimal>,
    /// Cached overtime-hour share of `paid`; see `base_hours`.
    #[serde(default)]
    pub ot_hours: Option<Decimal>,
    /// Per-shift policy overrides; always outrank company and settings.
    #[serde(default)]
    pub overrides: ShiftOverrides,
    /// Creation timestamp in Unix milliseconds.
    #[serde(default)]
    pub created_at: u64,
}

impl Shift {
    /// Creates an empty shift for the given company and date.
    ///
    /// All flags are clear, all times empty and all derived fields zero;
    /// callers fill in what they need and run the save pipeline to compute
    /// the derived fields.
    pub fn new(id: impl Into<String>, company_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            company_id: company_id.into(),
            date,
            start: String::new(),
            finish: String::new(),
            shift_type: ShiftType::Day,
            annual_leave: false,
            sick_day: false,
            bank_holiday: false,
            night_out: false,
            night_out_count: 0,
            night_out_pay: Decimal::ZERO,
            vehicle: String::new(),
            trailer1: String::new(),
            trailer2: String::new(),
            start_mileage: Decimal::ZERO,
            finish_mileage: Decimal::ZERO,
            mileage: Decimal::ZERO,
            expenses: Expenses::default(),
            notes: String::new(),
            worked: Decimal::ZERO,
            breaks: Decimal::ZERO,
            paid: Decimal::ZERO,
            base_hours: None,
            ot_hours: None,
            overrides: ShiftOverrides::default(),
            created_at: 0,
        }
    }

    /// Returns `true` when the shift is a leave day (annual leave or sick).
    ///
    /// Both flags funnel through this one predicate so that a record that
    /// somehow carries both (prevented at entry, not re-validated here)
    /// gets consistent leave treatment everywhere.
    pub fn is_leave(&self) -> bool {
        self.annual_leave || self.sick_day
    }

    /// Returns `true` when both start and finish times are recorded.
    pub fn has_times(&self) -> bool {
        !self.start.is_empty() && !self.finish.is_empty()
    }

    /// Returns the weekday of the shift date.
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}
