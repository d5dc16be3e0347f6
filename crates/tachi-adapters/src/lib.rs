//! Infrastructure adapters for tachi.
//!
//! This crate implements the ports defined in `tachi-core::application::ports`
//! and owns every external dependency: the filesystem, minijinja with its
//! embedded templates, and YAML.

pub mod filesystem;
pub mod renderer;
pub mod yaml;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::JinjaRenderer;
pub use yaml::{ProjectFileError, load_project, parse_project, project_to_yaml, save_project};
