//! Data models for the work-log engine.
//!
//! This module contains the entity types consumed by the calculation core
//! (shifts, companies, global settings) and the aggregate result types it
//! produces.

mod company;
mod period_result;
mod settings;
mod shift;

pub use company::{BonusRule, Company, NightBonusMode, OtMultipliers, PayMode};
pub use period_result::PeriodResult;
pub use settings::Settings;
pub use shift::{Expenses, Shift, ShiftOverrides, ShiftType};
