pub mod output_plan;
pub mod project;
pub mod setup;

pub use output_plan::{DirectoryToCreate, FileToWrite, FsEntry, OutputPlan};
pub use project::{AzureTarget, Project, Service};
pub use setup::{RequiredSecret, ServiceSummary, SetupGuide};
