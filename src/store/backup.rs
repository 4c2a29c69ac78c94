//! Versioned backup export and import.
//!
//! Backups are self-contained JSON documents carrying every record the
//! store holds plus a data-model version. Import accepts any older version
//! and migrates it forward; the migrations are idempotent, so re-importing
//! a current backup is a no-op. A document that cannot be made sense of is
//! rejected wholesale rather than partially applied.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EngineError, EngineResult};
use crate::models::{Company, Settings, Shift};

use super::repository::WorkLogStore;

/// Current backup data-model version.
///
/// Version history:
/// - v1: no sick days, no night-out fields, notes stored under `defects`.
/// - v2: single `nightBonus` object per company instead of `bonusRules`.
/// - v3: current model.
pub const DATA_MODEL_VERSION: u32 = 3;

/// A complete, versioned snapshot of the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    /// Data-model version the document was written with.
    pub version: u32,
    /// When the backup was exported.
    pub exported_at: DateTime<Utc>,
    /// All shift records.
    #[serde(default)]
    pub shifts: Vec<Shift>,
    /// The vehicle registry.
    #[serde(default)]
    pub vehicles: Vec<String>,
    /// All companies, the synthetic Default included.
    #[serde(default)]
    pub companies: Vec<Company>,
    /// Global settings.
    #[serde(default)]
    pub settings: Settings,
}

impl Backup {
    /// Snapshots a store at the current data-model version.
    pub fn from_store(store: &WorkLogStore) -> Self {
        Self {
            version: DATA_MODEL_VERSION,
            exported_at: Utc::now(),
            shifts: store.shifts().to_vec(),
            vehicles: store.vehicles().to_vec(),
            companies: store.companies().to_vec(),
            settings: store.settings().clone(),
        }
    }

    /// Serializes the backup as pretty-printed JSON.
    pub fn to_json(&self) -> EngineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| EngineError::BackupInvalid {
            message: e.to_string(),
        })
    }

    /// Parses and migrates a backup document.
    ///
    /// Older documents are rewritten field by field before deserialization
    /// (`defects` notes, legacy `nightBonus` objects), then every record is
    /// normalized: registrations upper-cased and de-duplicated, negative
    /// amounts clamped to zero, non-positive multipliers reset to one.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let mut value: Value =
            serde_json::from_str(json).map_err(|e| EngineError::BackupInvalid {
                message: e.to_string(),
            })?;

        let doc = value.as_object_mut().ok_or_else(|| EngineError::BackupInvalid {
            message: "not a JSON object".to_string(),
        })?;

        let version = doc
            .get("version")
            .and_then(Value::as_u64)
            .unwrap_or(1) as u32;

        if let Some(shifts) = doc.get_mut("shifts").and_then(Value::as_array_mut) {
            for shift in shifts {
                migrate_shift_value(shift);
            }
        }
        if let Some(companies) = doc.get_mut("companies").and_then(Value::as_array_mut) {
            for company in companies {
                migrate_company_value(company);
            }
        }

        let shifts = take_section::<Vec<Shift>>(doc, "shifts")?;
        let vehicles = take_section::<Vec<String>>(doc, "vehicles")?;
        let companies = take_section::<Vec<Company>>(doc, "companies")?;
        let settings = take_section::<Settings>(doc, "settings")?;

        let mut backup = Self {
            version,
            exported_at: doc
                .get("exportedAt")
                .and_then(|v| serde_json::from_value(v.clone()).ok())
                .unwrap_or_else(Utc::now),
            shifts,
            vehicles,
            companies,
            settings,
        };
        backup.normalize();

        if version < DATA_MODEL_VERSION {
            tracing::info!(
                from = version,
                to = DATA_MODEL_VERSION,
                "migrated backup data model"
            );
        }
        backup.version = DATA_MODEL_VERSION;

        Ok(backup)
    }

    fn normalize(&mut self) {
        let mut seen = Vec::new();
        for reg in &self.vehicles {
            let reg = reg.trim().to_uppercase();
            if !reg.is_empty() && !seen.contains(&reg) {
                seen.push(reg);
            }
        }
        self.vehicles = seen;

        for shift in &mut self.shifts {
            shift.vehicle = shift.vehicle.trim().to_uppercase();
            shift.night_out_pay = shift.night_out_pay.max(Decimal::ZERO);
            shift.start_mileage = shift.start_mileage.max(Decimal::ZERO);
            shift.finish_mileage = shift.finish_mileage.max(Decimal::ZERO);
            shift.expenses.parking = shift.expenses.parking.max(Decimal::ZERO);
            shift.expenses.tolls = shift.expenses.tolls.max(Decimal::ZERO);
            if shift.mileage <= Decimal::ZERO {
                shift.mileage = (shift.finish_mileage - shift.start_mileage).max(Decimal::ZERO);
            }
        }

        for company in &mut self.companies {
            company.base_rate = company.base_rate.max(Decimal::ZERO);
            company.base_weekly_hours = company.base_weekly_hours.max(Decimal::ZERO);
            company.standard_shift_length = company.standard_shift_length.max(Decimal::ZERO);
            company.daily_ot_after_worked_hours =
                company.daily_ot_after_worked_hours.max(Decimal::ZERO);
            company.min_paid_shift_hours = company.min_paid_shift_hours.max(Decimal::ZERO);
            company.ot.weekday = positive_or_one(company.ot.weekday);
            company.ot.saturday = positive_or_one(company.ot.saturday);
            company.ot.sunday = positive_or_one(company.ot.sunday);
            company.ot.bank_holiday = positive_or_one(company.ot.bank_holiday);
        }

        self.settings.base_rate = self.settings.base_rate.max(Decimal::ZERO);
        self.settings.base_hours = self.settings.base_hours.max(Decimal::ZERO);
        self.settings.ot_weekday = positive_or_one(self.settings.ot_weekday);
        self.settings.ot_saturday = positive_or_one(self.settings.ot_saturday);
        self.settings.ot_sunday = positive_or_one(self.settings.ot_sunday);
        self.settings.ot_bank_holiday = positive_or_one(self.settings.ot_bank_holiday);
    }
}

impl WorkLogStore {
    /// Exports the store as a backup JSON document.
    pub fn export_backup(&self) -> EngineResult<String> {
        Backup::from_store(self).to_json()
    }

    /// Replaces the entire store contents with the backup's.
    ///
    /// Every restored shift is run back through the recompute pipeline so
    /// its derived fields reflect the restored policies rather than the
    /// ones it was exported under.
    pub fn restore_backup(&mut self, backup: Backup) {
        self.replace_all(
            backup.shifts,
            backup.companies,
            backup.vehicles,
            backup.settings,
        );
    }
}

fn take_section<T: serde::de::DeserializeOwned + Default>(
    doc: &mut serde_json::Map<String, Value>,
    key: &str,
) -> EngineResult<T> {
    match doc.remove(key) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value).map_err(|e| EngineError::BackupInvalid {
            message: format!("section '{key}': {e}"),
        }),
    }
}

fn positive_or_one(value: Decimal) -> Decimal {
    if value > Decimal::ZERO { value } else { Decimal::ONE }
}

/// v1 records stored free text under `defects`.
fn migrate_shift_value(shift: &mut Value) {
    let Some(obj) = shift.as_object_mut() else {
        return;
    };

    let defects = obj
        .remove("defects")
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();
    let notes_missing = obj
        .get("notes")
        .and_then(Value::as_str)
        .map(str::is_empty)
        .unwrap_or(true);
    if !defects.is_empty() && notes_missing {
        obj.insert("notes".to_string(), Value::String(defects));
    }
}

/// v2 companies carried one `nightBonus` object instead of `bonusRules`.
fn migrate_company_value(company: &mut Value) {
    let Some(obj) = company.as_object_mut() else {
        return;
    };

    let Some(night_bonus) = obj.remove("nightBonus") else {
        return;
    };

    let has_rules = obj
        .get("bonusRules")
        .and_then(Value::as_array)
        .map(|rules| !rules.is_empty())
        .unwrap_or(false);
    if has_rules {
        return;
    }

    let mode = night_bonus
        .get("mode")
        .and_then(Value::as_str)
        .unwrap_or("none")
        .to_string();
    if mode == "none" {
        return;
    }

    let rule = serde_json::json!({
        "type": "night_window",
        "mode": mode,
        "amount": night_bonus.get("amount").cloned().unwrap_or(Value::from(0)),
        "start": night_bonus.get("start").and_then(Value::as_str).unwrap_or("22:00"),
        "end": night_bonus.get("end").and_then(Value::as_str).unwrap_or("06:00"),
    });
    obj.insert("bonusRules".to_string(), Value::Array(vec![rule]));
}
