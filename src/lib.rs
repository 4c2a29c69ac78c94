//! Work-log and payroll estimation engine for drivers with multiple employers.
//!
//! This crate computes worked/paid hours, daily and weekly overtime, night-window
//! bonuses and aggregate pay estimates from logged shifts and per-company pay
//! policies. It is an estimator, not a payroll system of record: results should
//! always be checked against real payslips.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
