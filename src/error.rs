//! Error types for the work-log engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur outside the pure calculation core.
//! The core itself never fails: malformed numeric data is coerced to safe
//! defaults instead (zero pay impact).

use thiserror::Error;

/// The main error type for the work-log engine.
///
/// All fallible operations in the crate return this error type, making it
/// easy to handle errors consistently throughout an application.
///
/// # Example
///
/// ```
/// use worklog_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/settings.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/settings.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A shift failed validation at the entry boundary.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift (may be empty for unsaved shifts).
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// A company record failed validation at the entry boundary.
    #[error("Invalid company field '{field}': {message}")]
    InvalidCompany {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A company id was not found in the store.
    #[error("Company not found: {id}")]
    CompanyNotFound {
        /// The company id that was not found.
        id: String,
    },

    /// A company could not be deleted because it is still referenced or required.
    #[error("Company '{id}' cannot be deleted: {reason}")]
    CompanyDeleteBlocked {
        /// The company id.
        id: String,
        /// Why the delete was refused.
        reason: String,
    },

    /// A backup document was malformed and was rejected wholesale.
    #[error("Invalid backup data: {message}")]
    BackupInvalid {
        /// A description of what made the backup invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/settings.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/settings.yaml"
        );
    }

    #[test]
    fn test_invalid_shift_displays_id_and_message() {
        let error = EngineError::InvalidShift {
            shift_id: "shf_001".to_string(),
            message: "annual leave and sick day are mutually exclusive".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid shift 'shf_001': annual leave and sick day are mutually exclusive"
        );
    }

    #[test]
    fn test_company_not_found_displays_id() {
        let error = EngineError::CompanyNotFound {
            id: "cmp_missing".to_string(),
        };
        assert_eq!(error.to_string(), "Company not found: cmp_missing");
    }

    #[test]
    fn test_company_delete_blocked_displays_reason() {
        let error = EngineError::CompanyDeleteBlocked {
            id: "cmp_abc".to_string(),
            reason: "shifts still reference it".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Company 'cmp_abc' cannot be deleted: shifts still reference it"
        );
    }

    #[test]
    fn test_backup_invalid_displays_message() {
        let error = EngineError::BackupInvalid {
            message: "not a JSON object".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid backup data: not a JSON object");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_company_not_found() -> EngineResult<()> {
            Err(EngineError::CompanyNotFound {
                id: "cmp_x".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_company_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
