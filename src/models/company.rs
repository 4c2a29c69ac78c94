//! Company model: the owner of a pay policy.
//!
//! A [`Company`] holds the rates, thresholds and multipliers that the
//! calculation core resolves against (after per-shift overrides, before
//! global settings). Exactly one synthetic "Default" company always exists
//! in a store as the lowest-priority fallback; see [`crate::store`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Settings;

/// How overtime is determined for a company.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayMode {
    /// Overtime is allocated from a rolling weekly hour allowance (default).
    #[default]
    Weekly,
    /// Overtime starts after a per-shift worked-hour threshold.
    Daily,
}

/// Overtime multipliers by day type.
///
/// A multiplier of 1 means overtime hours are paid at the base rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OtMultipliers {
    /// Multiplier for Monday–Friday overtime.
    pub weekday: Decimal,
    /// Multiplier for Saturday overtime.
    pub saturday: Decimal,
    /// Multiplier for Sunday overtime.
    pub sunday: Decimal,
    /// Multiplier for bank-holiday shifts; always wins over the weekend
    /// multipliers when the flag is set.
    pub bank_holiday: Decimal,
}

impl Default for OtMultipliers {
    fn default() -> Self {
        Self {
            weekday: Decimal::ONE,
            saturday: Decimal::ONE,
            sunday: Decimal::ONE,
            bank_holiday: Decimal::ONE,
        }
    }
}

/// Pricing mode for a night-window bonus rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NightBonusMode {
    /// The amount is paid for every hour inside the window.
    PerHour,
    /// The amount is paid once per shift that touches the window.
    PerShift,
    /// The amount is paid once per (ISO week, company) pair.
    PerWeek,
}

/// A supplemental-pay rule configured on a company.
///
/// Rules form an ordered list; only the first non-`None` rule (the
/// "primary rule") is active. Representing the variants as a sum type keeps
/// the pricing site exhaustive: a new rule kind cannot be silently ignored.
///
/// # Example
///
/// ```
/// use worklog_engine::models::{BonusRule, NightBonusMode};
/// use rust_decimal::Decimal;
///
/// let rule = BonusRule::NightWindow {
///     mode: NightBonusMode::PerHour,
///     amount: Decimal::new(50, 2), // £0.50/hr
///     start: "22:00".to_string(),
///     end: "06:00".to_string(),
/// };
/// assert!(rule.is_active());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BonusRule {
    /// No bonus; placeholder slot in the rule list.
    None,
    /// Pays for hours falling inside a clock-time window, possibly spanning
    /// midnight (e.g. 22:00–06:00).
    NightWindow {
        /// How the amount is applied (per hour / per shift / per week).
        mode: NightBonusMode,
        /// The bonus amount in currency.
        #[serde(default)]
        amount: Decimal,
        /// Window start as `HH:MM`.
        #[serde(default = "default_window_start")]
        start: String,
        /// Window end as `HH:MM`; at or before `start` means the window
        /// crosses midnight.
        #[serde(default = "default_window_end")]
        end: String,
    },
    /// Pays a flat amount once per shift with nonzero paid time.
    PerShiftFlat {
        /// The flat amount in currency.
        #[serde(default)]
        amount: Decimal,
    },
}

fn default_window_start() -> String {
    "22:00".to_string()
}

fn default_window_end() -> String {
    "06:00".to_string()
}

impl BonusRule {
    /// Returns `true` for any rule other than [`BonusRule::None`].
    pub fn is_active(&self) -> bool {
        !matches!(self, BonusRule::None)
    }
}

/// A pay policy owner.
///
/// Policy fields that are zero mean "not configured" and fall through to
/// the next resolution tier where one exists (see the individual field
/// docs and [`crate::calculation::rate_profile`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Opaque company id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Hourly rate in currency.
    #[serde(default)]
    pub base_rate: Decimal,
    /// Weekly or daily overtime scheme.
    #[serde(default)]
    pub pay_mode: PayMode,
    /// Weekly overtime threshold in paid hours (weekly mode).
    #[serde(default)]
    pub base_weekly_hours: Decimal,
    /// Salaried daily paid hours (informational).
    #[serde(default)]
    pub base_daily_paid_hours: Decimal,
    /// Standard shift length; fallback daily-overtime threshold when
    /// `daily_ot_after_worked_hours` is unset.
    #[serde(default)]
    pub standard_shift_length: Decimal,
    /// Daily overtime threshold in worked hours (daily mode).
    #[serde(default, rename = "dailyOTAfterWorkedHours")]
    pub daily_ot_after_worked_hours: Decimal,
    /// Minimum paid hours per shift (agency minimum); raises `paid`, never
    /// lowers it.
    #[serde(default)]
    pub min_paid_shift_hours: Decimal,
    /// Overtime multipliers by day type.
    #[serde(default)]
    pub ot: OtMultipliers,
    /// Ordered bonus rules; only the first active rule applies.
    #[serde(default)]
    pub bonus_rules: Vec<BonusRule>,
    /// Whether the entry form shows the vehicle field for this company.
    #[serde(default = "default_true")]
    pub show_vehicle_field: bool,
    /// Whether the entry form shows the trailer fields for this company.
    #[serde(default = "default_true")]
    pub show_trailer_fields: bool,
    /// Whether the entry form shows the mileage fields for this company.
    #[serde(default)]
    pub show_mileage_fields: bool,
    /// Subset of the global vehicle registry assigned to this company,
    /// used to build the per-shift vehicle suggestion list.
    #[serde(default)]
    pub vehicle_ids: Vec<String>,
    /// Contact person (pass-through).
    #[serde(default)]
    pub contact_name: String,
    /// Contact phone number (pass-through).
    #[serde(default)]
    pub contact_number: String,
    /// Creation timestamp in Unix milliseconds.
    #[serde(default)]
    pub created_at: u64,
}

fn default_true() -> bool {
    true
}

impl Company {
    /// The id of the synthetic fallback company present in every store.
    pub const DEFAULT_ID: &'static str = "cmp_default";

    /// Creates a company with the given id and name and all policy fields
    /// unset (zero / weekly / no bonus rules).
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_rate: Decimal::ZERO,
            pay_mode: PayMode::Weekly,
            base_weekly_hours: Decimal::ZERO,
            base_daily_paid_hours: Decimal::ZERO,
            standard_shift_length: Decimal::ZERO,
            daily_ot_after_worked_hours: Decimal::ZERO,
            min_paid_shift_hours: Decimal::ZERO,
            ot: OtMultipliers::default(),
            bonus_rules: Vec::new(),
            show_vehicle_field: true,
            show_trailer_fields: true,
            show_mileage_fields: false,
            vehicle_ids: Vec::new(),
            contact_name: String::new(),
            contact_number: String::new(),
            created_at: 0,
        }
    }

    /// Builds the synthetic "Default" company from global settings.
    ///
    /// It seeds its rate, weekly hours and multipliers from [`Settings`] so
    /// that a fresh store produces sensible estimates before the user has
    /// configured any real company.
    pub fn synthetic_default(settings: &Settings) -> Self {
        let mut company = Self::new(Self::DEFAULT_ID, "Default");
        company.base_rate = settings.base_rate;
        company.base_weekly_hours = settings.base_hours;
        company.ot = OtMultipliers {
            weekday: settings.ot_weekday,
            saturday: settings.ot_saturday,
            sunday: settings.ot_sunday,
            bank_holiday: settings.ot_bank_holiday,
        };
        company
    }

    /// Returns the first active (non-`None`) bonus rule, if any.
    ///
    /// Exactly one rule is active per company at any time; later entries in
    /// the list are ignored.
    pub fn primary_bonus_rule(&self) -> Option<&BonusRule> {
        self.bonus_rules.iter().find(|r| r.is_active())
    }

    /// Returns `true` for the synthetic fallback company.
    pub fn is_synthetic_default(&self) -> bool {
        self.id == Self::DEFAULT_ID
    }
}
