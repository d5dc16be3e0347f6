//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `tachi-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::application::ApplicationError;
use crate::error::TachiResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `tachi_adapters::filesystem::LocalFilesystem` (production)
/// - `tachi_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> TachiResult<()>;

    /// Write content to a file, replacing any existing content.
    fn write_file(&self, path: &Path, content: &str) -> TachiResult<()>;

    /// Names of the entries directly inside `path`, sorted.
    ///
    /// A missing path is not an error and lists nothing.
    fn list_dir(&self, path: &Path) -> TachiResult<Vec<PathBuf>>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `tachi_adapters::renderer::JinjaRenderer` (embedded minijinja assets)
pub trait TemplateRenderer: Send + Sync {
    /// Render the named template asset with `context` in scope.
    fn render(&self, template: &str, context: &RenderContext) -> TachiResult<String>;
}

/// Variables in scope while rendering one template.
///
/// A JSON object: each top-level key is a template variable.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext(Value);

impl RenderContext {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Build a context from any serializable value.
    pub fn from_serialize<T: Serialize>(value: &T) -> TachiResult<Self> {
        serde_json::to_value(value)
            .map(Self)
            .map_err(|e| {
                ApplicationError::RenderingFailed {
                    template: "<context>".into(),
                    reason: e.to_string(),
                }
                .into()
            })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}
