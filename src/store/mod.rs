//! In-memory store for shifts, companies, vehicles and settings.
//!
//! The store is the mutable boundary of the engine: it validates entries,
//! runs the save pipeline that recomputes derived shift fields, enforces
//! the company CRUD guards and owns backup export/import (including the
//! data-model migration of older backups).
//!
//! # Example
//!
//! ```
//! use worklog_engine::models::{Settings, Shift};
//! use worklog_engine::store::WorkLogStore;
//! use chrono::NaiveDate;
//!
//! let mut store = WorkLogStore::new(Settings::default());
//! // A fresh store always has the synthetic Default company.
//! assert_eq!(store.companies().len(), 1);
//!
//! let mut shift = Shift::new(
//!     "shf_001",
//!     "cmp_default",
//!     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
//! );
//! shift.start = "08:00".to_string();
//! shift.finish = "18:00".to_string();
//! store.save_shift(shift).unwrap();
//!
//! assert_eq!(store.shifts().len(), 1);
//! ```

mod backup;
mod repository;

pub use backup::{Backup, DATA_MODEL_VERSION};
pub use repository::WorkLogStore;
