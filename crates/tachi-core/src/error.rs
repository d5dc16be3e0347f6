//! Unified error handling for tachi core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for tachi core operations.
#[derive(Debug, Error, Clone)]
pub enum TachiError {
    /// The configuration could not be turned into a model.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Orchestration failures: validation, conflicts, rendering, writing.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl TachiError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display and exit-code purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Load => ErrorCategory::Load,
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// Validation problems carried by this error, if any.
    pub fn validation_errors(&self) -> &[crate::domain::ValidationError] {
        match self {
            Self::Application(e) => e.validation_errors(),
            Self::Domain(_) => &[],
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The configuration could not be read or parsed.
    Load,
    /// The configuration loaded but violates constraints.
    Validation,
    /// Generation would overwrite existing content.
    Conflict,
    /// Rendering or writing failed.
    Generation,
    Internal,
}

/// Convenient result type alias.
pub type TachiResult<T> = Result<T, TachiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationError;

    #[test]
    fn domain_load_errors_keep_their_category() {
        let err: TachiError = DomainError::EmptyDocument.into();
        assert_eq!(err.category(), ErrorCategory::Load);
        assert_eq!(err.to_string(), "Configuration document is empty");
    }

    #[test]
    fn validation_errors_are_reachable_from_root() {
        let err: TachiError = ApplicationError::InvalidConfiguration {
            errors: vec![ValidationError::NoServices],
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.validation_errors(), [ValidationError::NoServices]);
    }
}
