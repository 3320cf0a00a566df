//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the tracing filter parses
//! - Check the data directory can yield a user id
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DiagnosticsConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::DiagnosticsConfig;
use crate::resolver::metadata::parse_user_id;

/// A single semantic problem in a config.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("logging.filter is empty")]
    EmptyFilter,

    #[error("logging.filter '{filter}' is invalid: {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("process.data_dir '{0}' has no parent segment")]
    DataDirWithoutParent(String),
}

/// Validate a parsed config.
pub fn validate_config(config: &DiagnosticsConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let filter = config.logging.filter.trim();
    if filter.is_empty() {
        errors.push(ValidationError::EmptyFilter);
    } else if let Err(e) = EnvFilter::try_new(filter) {
        errors.push(ValidationError::InvalidFilter {
            filter: filter.to_string(),
            reason: e.to_string(),
        });
    }

    if let Some(data_dir) = &config.process.data_dir {
        if parse_user_id(data_dir).is_err() {
            errors.push(ValidationError::DataDirWithoutParent(
                data_dir.display().to_string(),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&DiagnosticsConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = DiagnosticsConfig::default();
        config.logging.filter = "  ".into();
        config.process.data_dir = Some(PathBuf::from("/"));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyFilter,
                ValidationError::DataDirWithoutParent("/".into()),
            ]
        );
    }

    #[test]
    fn test_invalid_filter() {
        let mut config = DiagnosticsConfig::default();
        config.logging.filter = "host_diag=loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidFilter { .. }));
    }
}
