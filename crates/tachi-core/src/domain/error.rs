// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// These are *fatal* errors: the configuration could not be turned into a
/// model at all. Field-level problems on a model that did load are
/// [`crate::domain::ValidationError`] values, which are collected rather
/// than raised.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Load Errors
    // ========================================================================
    #[error("Configuration document is empty")]
    EmptyDocument,

    #[error("Invalid configuration document: {reason}")]
    InvalidDocument { reason: String },

    // ========================================================================
    // Lookup Errors
    // ========================================================================
    #[error("Invalid strategy: '{value}'. Must be one of: {valid}")]
    UnknownStrategy { value: String, valid: String },

    // ========================================================================
    // Output Plan Errors
    // ========================================================================
    #[error("Output plan is empty")]
    EmptyPlan,

    #[error("Duplicate path in output plan: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute path not allowed in output plan: {path}")]
    AbsolutePathNotAllowed { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyDocument => vec![
                "The file contains no YAML mapping".into(),
                "Start from the example in the README, or run `tachi generate` without --config for interactive mode".into(),
            ],
            Self::InvalidDocument { .. } => vec![
                "Check the YAML syntax and the field types".into(),
                "Required keys: name, strategy, azure.resource_group, azure.registry, services[].name".into(),
            ],
            Self::UnknownStrategy { valid, .. } => {
                vec![format!("Use one of: {valid}")]
            }
            Self::EmptyPlan | Self::DuplicatePath { .. } | Self::AbsolutePathNotAllowed { .. } => {
                vec!["This is a bug in tachi; please report it with your configuration file".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyDocument | Self::InvalidDocument { .. } => ErrorCategory::Load,
            Self::UnknownStrategy { .. } => ErrorCategory::Validation,
            Self::EmptyPlan | Self::DuplicatePath { .. } | Self::AbsolutePathNotAllowed { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Load,
    Validation,
    Internal,
}
