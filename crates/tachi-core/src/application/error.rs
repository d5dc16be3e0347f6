//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` and `ValidationError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ValidationError;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The project failed validation; every problem is listed.
    #[error("Configuration is invalid ({} {})", .errors.len(), error_noun(.errors.len()))]
    InvalidConfiguration { errors: Vec<ValidationError> },

    /// Output directory already has content and overwriting was not requested.
    #[error("Output directory is not empty: {path}")]
    OutputConflict { path: PathBuf },

    /// No template asset with this name.
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// Template rendering failed.
    #[error("Failed to render {template}: {reason}")]
    RenderingFailed { template: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared state lock was poisoned.
    #[error("Internal store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidConfiguration { .. } => vec![
                "Fix every listed problem, then run again".into(),
                "Try: tachi validate --config <file> to check without generating".into(),
            ],
            Self::OutputConflict { path } => vec![
                format!("{} already contains files", path.display()),
                "Use --force to overwrite existing files".into(),
                "Or choose another directory with --output".into(),
                "Use --dry-run to preview what would be written".into(),
            ],
            Self::TemplateNotFound { name } => vec![
                format!("No embedded template named '{name}'"),
                "This is a bug in tachi; please report it".into(),
            ],
            Self::RenderingFailed { template, .. } => vec![
                format!("Rendering {template} failed"),
                "Check for unusual characters in names and values".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Files written before the failure were left in place".into(),
            ],
            Self::StoreLockError => vec!["Try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfiguration { .. } => ErrorCategory::Validation,
            Self::OutputConflict { .. } => ErrorCategory::Conflict,
            Self::TemplateNotFound { .. }
            | Self::RenderingFailed { .. }
            | Self::FilesystemError { .. } => ErrorCategory::Generation,
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }

    /// Validation problems carried by this error, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidConfiguration { errors } => errors,
            _ => &[],
        }
    }
}

fn error_noun(count: usize) -> &'static str {
    if count == 1 { "error" } else { "errors" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_configuration_counts_errors() {
        let one = ApplicationError::InvalidConfiguration {
            errors: vec![ValidationError::NoServices],
        };
        assert_eq!(one.to_string(), "Configuration is invalid (1 error)");
        assert_eq!(one.validation_errors().len(), 1);

        let two = ApplicationError::InvalidConfiguration {
            errors: vec![
                ValidationError::NoServices,
                ValidationError::EmptyField { field: "name" },
            ],
        };
        assert_eq!(two.to_string(), "Configuration is invalid (2 errors)");
    }

    #[test]
    fn conflict_suggests_force() {
        let err = ApplicationError::OutputConflict { path: "out".into() };
        assert_eq!(err.category(), ErrorCategory::Conflict);
        assert!(err.suggestions().iter().any(|s| s.contains("--force")));
    }
}
