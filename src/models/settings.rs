//! Global settings: the lowest-priority tier of the pay-policy chain.
//!
//! A settings value is consulted only when a shift has no override and its
//! company has no explicit value (or the company reference dangles).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Process-wide fallback pay policy and entry-form defaults.
///
/// The numeric defaults mirror the values a fresh installation starts with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Default start time (`HH:MM`) pre-filled on the entry form.
    pub default_start: String,
    /// Default finish time (`HH:MM`) pre-filled on the entry form.
    pub default_finish: String,
    /// Fallback hourly rate.
    pub base_rate: Decimal,
    /// Fallback weekly overtime threshold in paid hours.
    pub base_hours: Decimal,
    /// Fallback weekday overtime multiplier.
    pub ot_weekday: Decimal,
    /// Fallback Saturday overtime multiplier.
    pub ot_saturday: Decimal,
    /// Fallback Sunday overtime multiplier.
    pub ot_sunday: Decimal,
    /// Fallback bank-holiday overtime multiplier.
    pub ot_bank_holiday: Decimal,
    /// Annual leave allowance in days (informational).
    pub annual_leave_allowance: Decimal,
    /// Default flat pay for one night out.
    pub default_night_out_pay: Decimal,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_start: String::new(),
            default_finish: String::new(),
            base_rate: Decimal::new(1775, 2),  // 17.75
            base_hours: Decimal::from(45),
            ot_weekday: Decimal::new(125, 2),  // 1.25
            ot_saturday: Decimal::new(125, 2), // 1.25
            ot_sunday: Decimal::new(15, 1),    // 1.50
            ot_bank_holiday: Decimal::from(2),
            annual_leave_allowance: Decimal::ZERO,
            default_night_out_pay: Decimal::ZERO,
        }
    }
}
