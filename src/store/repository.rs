//! The in-memory repository and its entry-boundary rules.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::calculation::{PayContext, recompute_shift};
use crate::error::{EngineError, EngineResult};
use crate::models::{Company, Settings, Shift};

/// Holds all engine data and enforces the entry-boundary invariants.
///
/// Reads hand out a [`PayContext`] over the company list and settings so
/// the pure calculation core never touches the store directly. Writes go
/// through validating methods; `save_shift` additionally runs the pipeline
/// that recomputes the shift's derived hour fields.
#[derive(Debug, Clone)]
pub struct WorkLogStore {
    shifts: Vec<Shift>,
    companies: Vec<Company>,
    vehicles: Vec<String>,
    settings: Settings,
    default_company_id: String,
}

impl WorkLogStore {
    /// Creates an empty store with the given settings.
    ///
    /// The synthetic Default company is created immediately so a fresh
    /// store can price shifts before any real company exists.
    pub fn new(settings: Settings) -> Self {
        let mut store = Self {
            shifts: Vec::new(),
            companies: Vec::new(),
            vehicles: Vec::new(),
            settings,
            default_company_id: String::new(),
        };
        store.ensure_default_company();
        store
    }

    /// Returns all shifts, in storage order.
    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    /// Returns all companies, the synthetic Default included.
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    /// Returns the vehicle registry.
    pub fn vehicles(&self) -> &[String] {
        &self.vehicles
    }

    /// Returns the global settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replaces the global settings.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Returns a calculation context over the store's companies and
    /// settings.
    pub fn context(&self) -> PayContext<'_> {
        PayContext::new(&self.companies, &self.settings)
    }

    /// Creates the synthetic Default company when no companies exist at
    /// all. Idempotent; a store with user companies is left untouched.
    pub fn ensure_default_company(&mut self) {
        if !self.companies.is_empty() {
            return;
        }
        self.companies.push(Company::synthetic_default(&self.settings));
    }

    /// Returns the user-created companies (everything but the synthetic
    /// Default).
    pub fn user_companies(&self) -> Vec<&Company> {
        self.companies
            .iter()
            .filter(|c| !c.is_synthetic_default())
            .collect()
    }

    /// Returns the companies offered for shift entry: the user companies,
    /// or the synthetic Default when none exist yet.
    pub fn selectable_companies(&self) -> Vec<&Company> {
        let user: Vec<&Company> = self.user_companies();
        if user.is_empty() {
            self.companies.iter().collect()
        } else {
            user
        }
    }

    /// Looks up a company by id.
    pub fn company(&self, id: &str) -> Option<&Company> {
        if id.is_empty() {
            return None;
        }
        self.companies.iter().find(|c| c.id == id)
    }

    /// Returns the id of the company pre-selected on the entry form, empty
    /// when none has been chosen.
    pub fn default_company_id(&self) -> &str {
        &self.default_company_id
    }

    /// Sets the pre-selected company for shift entry.
    pub fn set_default_company(&mut self, id: &str) -> EngineResult<()> {
        if self.company(id).is_none() {
            return Err(EngineError::CompanyNotFound { id: id.to_string() });
        }
        self.default_company_id = id.to_string();
        Ok(())
    }

    /// Inserts or updates a company.
    ///
    /// A blank name is rejected; a blank id gets a generated one. The
    /// company's assigned vehicles are folded into the global registry.
    pub fn upsert_company(&mut self, mut company: Company) -> EngineResult<String> {
        if company.name.trim().is_empty() {
            return Err(EngineError::InvalidCompany {
                field: "name".to_string(),
                message: "company name must not be blank".to_string(),
            });
        }
        if company.id.is_empty() {
            company.id = format!("cmp_{}", Uuid::new_v4());
        }
        for reg in &company.vehicle_ids {
            register_vehicle(&mut self.vehicles, reg);
        }
        company.vehicle_ids = company
            .vehicle_ids
            .iter()
            .filter_map(|reg| normalize_registration(reg))
            .collect();

        let id = company.id.clone();
        match self.companies.iter_mut().find(|c| c.id == company.id) {
            Some(existing) => *existing = company,
            None => self.companies.push(company),
        }
        Ok(id)
    }

    /// Deletes a company.
    ///
    /// Refused when the target is the synthetic Default, when it is the
    /// last user company, or when shifts still reference it.
    pub fn delete_company(&mut self, id: &str) -> EngineResult<()> {
        self.ensure_default_company();

        if id == Company::DEFAULT_ID {
            return Err(EngineError::CompanyDeleteBlocked {
                id: id.to_string(),
                reason: "the built-in Default company cannot be deleted".to_string(),
            });
        }

        if self.company(id).is_none() {
            return Err(EngineError::CompanyNotFound { id: id.to_string() });
        }

        if self.user_companies().len() <= 1 {
            return Err(EngineError::CompanyDeleteBlocked {
                id: id.to_string(),
                reason: "at least one company must remain".to_string(),
            });
        }

        if self.shifts.iter().any(|s| s.company_id == id) {
            return Err(EngineError::CompanyDeleteBlocked {
                id: id.to_string(),
                reason: "shifts still reference it".to_string(),
            });
        }

        self.companies.retain(|c| c.id != id);

        if self.default_company_id == id {
            self.default_company_id = self
                .user_companies()
                .first()
                .map(|c| c.id.clone())
                .unwrap_or_default();
        }
        Ok(())
    }

    /// Adds a vehicle registration to the registry. Registrations are
    /// upper-cased, trimmed and de-duplicated; blanks are ignored.
    pub fn add_vehicle(&mut self, registration: &str) {
        register_vehicle(&mut self.vehicles, registration);
    }

    /// Removes a vehicle registration from the registry.
    pub fn remove_vehicle(&mut self, registration: &str) {
        if let Some(reg) = normalize_registration(registration) {
            self.vehicles.retain(|v| *v != reg);
        }
    }

    /// Returns the vehicle suggestions for a company's entry form: the
    /// company's assigned vehicles when it has any, otherwise the whole
    /// registry.
    pub fn vehicle_suggestions(&self, company_id: &str) -> Vec<String> {
        let assigned = self
            .company(company_id)
            .map(|c| c.vehicle_ids.clone())
            .unwrap_or_default();
        if assigned.is_empty() {
            self.vehicles.clone()
        } else {
            assigned
        }
    }

    /// Validates a shift and saves it through the recompute pipeline.
    ///
    /// Returns the shift id. A shift must reference a company, and the
    /// annual-leave and sick-day flags are mutually exclusive. The vehicle
    /// registration is normalized and added to the registry, the mileage
    /// is backfilled from the odometer readings, and the derived hour
    /// fields are recomputed before the record is stored.
    pub fn save_shift(&mut self, mut shift: Shift) -> EngineResult<String> {
        if shift.company_id.is_empty() {
            return Err(EngineError::InvalidShift {
                shift_id: shift.id.clone(),
                message: "a company must be selected".to_string(),
            });
        }

        if shift.annual_leave && shift.sick_day {
            return Err(EngineError::InvalidShift {
                shift_id: shift.id.clone(),
                message: "annual leave and sick day are mutually exclusive".to_string(),
            });
        }

        if shift.id.is_empty() {
            shift.id = format!("shf_{}", Uuid::new_v4());
        }

        shift.vehicle = normalize_registration(&shift.vehicle).unwrap_or_default();
        if !shift.vehicle.is_empty() {
            register_vehicle(&mut self.vehicles, &shift.vehicle);
        }

        if shift.mileage <= Decimal::ZERO {
            shift.mileage = (shift.finish_mileage - shift.start_mileage).max(Decimal::ZERO);
        }

        let ctx = PayContext::new(&self.companies, &self.settings);
        recompute_shift(&mut shift, &ctx);

        let id = shift.id.clone();
        match self.shifts.iter_mut().find(|s| s.id == shift.id) {
            Some(existing) => *existing = shift,
            None => self.shifts.push(shift),
        }
        Ok(id)
    }

    /// Deletes a shift by id. Returns `true` when a record was removed.
    pub fn delete_shift(&mut self, id: &str) -> bool {
        let before = self.shifts.len();
        self.shifts.retain(|s| s.id != id);
        self.shifts.len() != before
    }

    pub(super) fn replace_all(
        &mut self,
        shifts: Vec<Shift>,
        companies: Vec<Company>,
        vehicles: Vec<String>,
        settings: Settings,
    ) {
        self.settings = settings;
        self.companies = companies;
        self.vehicles = vehicles;
        self.ensure_default_company();

        let ctx = PayContext::new(&self.companies, &self.settings);
        let mut restored = shifts;
        for shift in &mut restored {
            recompute_shift(shift, &ctx);
        }
        self.shifts = restored;

        if self.company(&self.default_company_id).is_none() {
            self.default_company_id.clear();
        }
    }
}

fn normalize_registration(registration: &str) -> Option<String> {
    let reg = registration.trim().to_uppercase();
    if reg.is_empty() { None } else { Some(reg) }
}

fn register_vehicle(vehicles: &mut Vec<String>, registration: &str) {
    if let Some(reg) = normalize_registration(registration) {
        if !vehicles.contains(&reg) {
            vehicles.push(reg);
        }
    }
}
