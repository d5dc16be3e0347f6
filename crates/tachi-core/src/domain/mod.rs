// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for tachi.
//!
//! Pure business logic: the configuration model, its validation, the
//! strategy catalog and the derived setup checklist. All I/O and template
//! rendering are reached through ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: Tracing starts at the application layer
//! - **Plain data**: All domain objects are Clone + PartialEq

pub mod catalog;
pub mod entities;
pub mod error;
pub mod validation;
pub mod value_objects;

pub use catalog::{STRATEGY_CATALOG, StrategyDef, WorkflowTemplate};
pub use entities::{
    AzureTarget, DirectoryToCreate, FileToWrite, FsEntry, OutputPlan, Project, RequiredSecret,
    Service, ServiceSummary, SetupGuide, project::defaults,
};
pub use error::{DomainError, ErrorCategory};
pub use validation::ValidationError;
pub use value_objects::{Environment, Strategy};
