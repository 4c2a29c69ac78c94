//! Configuration loading for the work-log engine.
//!
//! Global [`Settings`] can be loaded from a YAML file; every field is
//! optional and falls back to the fresh-install default.
//!
//! [`Settings`]: crate::models::Settings
//!
//! # Example
//!
//! ```no_run
//! use worklog_engine::config::SettingsLoader;
//!
//! let loader = SettingsLoader::load("./config/settings.yaml").unwrap();
//! println!("Base rate: {}", loader.settings().base_rate);
//! ```

mod loader;

pub use loader::SettingsLoader;
