//! Settings loading functionality.
//!
//! This module provides the [`SettingsLoader`] type for loading global
//! engine settings from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::Settings;

/// Loads and provides access to the global settings.
///
/// Settings live in a single YAML file with camelCase keys matching the
/// persisted JSON field names; every key is optional.
///
/// # Example
///
/// ```no_run
/// use worklog_engine::config::SettingsLoader;
///
/// let loader = SettingsLoader::load("./config/settings.yaml")?;
/// println!("Weekly base hours: {}", loader.settings().base_hours);
/// # Ok::<(), worklog_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    settings: Settings,
}

impl SettingsLoader {
    /// Loads settings from the specified YAML file.
    ///
    /// Returns an error if the file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let settings =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(Self { settings })
    }

    /// Loads settings from the file, falling back to defaults when the file
    /// does not exist. Parse errors are still reported.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        match Self::load(&path) {
            Ok(loader) => Ok(loader),
            Err(EngineError::ConfigNotFound { path }) => {
                tracing::info!(%path, "settings file not found, using defaults");
                Ok(Self {
                    settings: Settings::default(),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Consumes the loader and returns the settings.
    pub fn into_settings(self) -> Settings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/settings.yaml"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_settings() {
        let result = SettingsLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load settings: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.settings().base_rate, dec("17.75"));
        assert_eq!(loader.settings().base_hours, dec("45"));
        assert_eq!(loader.settings().default_start, "08:00");
        assert_eq!(loader.settings().default_night_out_pay, dec("26.20"));
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = SettingsLoader::load("/nonexistent/settings.yaml");
        assert!(result.is_err());

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("settings.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_load_or_default_falls_back_on_missing_file() {
        let loader = SettingsLoader::load_or_default("/nonexistent/settings.yaml").unwrap();
        assert_eq!(*loader.settings(), Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: Settings = serde_yaml::from_str("baseRate: \"20\"\n").unwrap();
        assert_eq!(parsed.base_rate, dec("20"));
        assert_eq!(parsed.base_hours, Settings::default().base_hours);
    }
}
