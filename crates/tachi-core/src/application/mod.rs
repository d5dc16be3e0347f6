//! Application layer for tachi.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerateService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    CONTAINER_CONFIGS_DIR, GenerateOptions, GenerateService, GenerationReport, SETUP_FILE,
    WORKFLOWS_DIR,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, RenderContext, TemplateRenderer};

pub use error::ApplicationError;
