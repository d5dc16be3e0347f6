//! Error handling for the tachi CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use thiserror::Error;

use tachi_adapters::ProjectFileError;
use tachi_core::domain::Strategy;
use tachi_core::error::{ErrorCategory as CoreCategory, TachiError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Everything that can end a `tachi` invocation early.
#[derive(Debug, Error)]
pub enum CliError {
    /// An error propagated from `tachi-core`.
    #[error(transparent)]
    Core(#[from] TachiError),

    /// The project configuration file does not exist.
    #[error("Configuration file not found: {}", .path.display())]
    ConfigNotFound { path: PathBuf },

    /// The project configuration file exists but could not be read.
    #[error("Failed to read configuration file {}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The project configuration file is not a usable YAML document.
    #[error("Invalid configuration file {}: {reason}", .path.display())]
    InvalidYaml { path: PathBuf, reason: String },

    /// Tool settings could not be loaded.
    #[error("Failed to load settings: {message}")]
    SettingsError { message: String },

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Interactive mode was needed but cannot run.
    #[error("Interactive mode is unavailable: {reason}")]
    InteractiveUnavailable { reason: &'static str },

    /// A prompt failed while reading an answer.
    #[error("Prompt failed: {message}")]
    Prompt { message: String },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Map a project file failure, keeping the path the user gave.
    pub fn project_file(err: ProjectFileError, path: &Path) -> Self {
        match err {
            ProjectFileError::NotFound { path } => Self::ConfigNotFound { path },
            ProjectFileError::Read { path, source } => Self::ConfigRead { path, source },
            ProjectFileError::Write { path, source } => Self::IoError {
                message: format!("failed to write {}", path.display()),
                source,
            },
            ProjectFileError::Document(err) => Self::InvalidYaml {
                path: path.to_path_buf(),
                reason: err.to_string(),
            },
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Core(core_err) => core_err.suggestions(),

            Self::ConfigNotFound { path } => vec![
                format!("Check the path: {}", path.display()),
                "Run `tachi generate` without --config to create one interactively".into(),
            ],

            Self::ConfigRead { .. } => vec![
                "Check the file permissions".into(),
                "Make sure the path points to a file, not a directory".into(),
            ],

            Self::InvalidYaml { .. } => vec![
                "Check the YAML syntax and the field types".into(),
                "Required keys: name, strategy, azure.resource_group, azure.registry, services[].name".into(),
                format!("Valid strategies: {}", Strategy::valid_names().join(", ")),
            ],

            Self::SettingsError { .. } => vec![
                "Check the settings file passed with --settings".into(),
                "Check TACHI_* environment variables".into(),
            ],

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::InteractiveUnavailable { .. } => vec![
                "Pass a configuration file: tachi generate --config tachi.yaml".into(),
                "Interactive mode needs a terminal and the `interactive` feature".into(),
            ],

            Self::Prompt { .. } => vec!["Run the command again from a terminal".into()],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Core(core) => match core.category() {
                CoreCategory::Load => ErrorCategory::Usage,
                CoreCategory::Validation => ErrorCategory::Validation,
                CoreCategory::Conflict => ErrorCategory::Conflict,
                CoreCategory::Generation => ErrorCategory::Generation,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::ConfigNotFound { .. }
            | Self::ConfigRead { .. }
            | Self::InvalidYaml { .. }
            | Self::SettingsError { .. }
            | Self::InteractiveUnavailable { .. } => ErrorCategory::Usage,
            Self::IoError { .. } | Self::Prompt { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category   | Code |
    /// |------------|------|
    /// | Usage/load |  2   |
    /// | Validation |  1   |
    /// | Conflict   |  1   |
    /// | Generation |  1   |
    /// | Internal   |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Usage => 2,
            ErrorCategory::Validation
            | ErrorCategory::Conflict
            | ErrorCategory::Generation
            | ErrorCategory::Internal => 1,
        }
    }

    /// Individual problems to list under the message, if any.
    fn details(&self) -> Vec<String> {
        match self {
            Self::Core(core) => core.validation_errors().iter().map(ToString::to_string).collect(),
            _ => Vec::new(),
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        for detail in self.details() {
            output.push_str(&format!("    {} {}\n", "•".red(), detail));
        }

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -d / --debug for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {}\n", self));

        for detail in self.details() {
            out.push_str(&format!("  - {detail}\n"));
        }

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -d / --debug for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::Usage => tracing::warn!("Usage error: {}", self),
            ErrorCategory::Validation => tracing::warn!("Validation failed: {}", self),
            ErrorCategory::Conflict => tracing::warn!("Conflict: {}", self),
            ErrorCategory::Generation => tracing::error!("Generation failed: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad arguments, missing or unreadable configuration.
    Usage,
    /// The configuration loaded but broke at least one rule.
    Validation,
    /// The output directory already has content.
    Conflict,
    /// Rendering or writing failed.
    Generation,
    /// Internal/system error.
    Internal,
}
