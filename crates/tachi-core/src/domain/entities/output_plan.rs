use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;

/// Rendered output ready for materialization.
///
/// Produced by the generator, consumed by the writer or printed as a
/// dry-run preview. It contains no business logic, only data. Paths are
/// relative to `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPlan {
    pub(crate) root: PathBuf,
    pub(crate) entries: Vec<FsEntry>,
}

impl OutputPlan {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: String) {
        self.entries.push(FsEntry::File(FileToWrite {
            path: path.into(),
            content,
        }));
    }

    pub fn add_directory(&mut self, path: impl Into<PathBuf>) {
        self.entries.push(FsEntry::Directory(DirectoryToCreate { path: path.into() }));
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: String) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn with_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.add_directory(path);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::EmptyPlan);
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            let path = entry.path();

            if !seen.insert(path) {
                return Err(DomainError::DuplicatePath {
                    path: path.display().to_string(),
                });
            }

            if path.is_absolute() {
                return Err(DomainError::AbsolutePathNotAllowed {
                    path: path.display().to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[FsEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::File(f) => Some(f),
            _ => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &DirectoryToCreate> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::Directory(d) => Some(d),
            _ => None,
        })
    }

    /// Look a file up by its path relative to the root.
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&FileToWrite> {
        let path = path.as_ref();
        self.files().find(|f| f.path == path)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsEntry {
    File(FileToWrite),
    Directory(DirectoryToCreate),
}

impl FsEntry {
    pub fn path(&self) -> &Path {
        match self {
            FsEntry::File(f) => &f.path,
            FsEntry::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileToWrite {
    pub path: PathBuf,
    pub content: String,
}

impl FileToWrite {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryToCreate {
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_correctly() {
        let plan = OutputPlan::new("/tmp/out")
            .with_directory(".github/workflows")
            .with_file(".github/workflows/pr-deploy.yaml", "name: PR".into());

        assert_eq!(plan.entry_count(), 2);
        assert_eq!(plan.files().count(), 1);
        assert_eq!(plan.directories().count(), 1);
        assert!(plan.validate().is_ok());
        assert_eq!(
            plan.file(".github/workflows/pr-deploy.yaml").map(FileToWrite::size),
            Some(8)
        );
    }

    #[test]
    fn rejects_duplicates() {
        let plan = OutputPlan::new("/tmp/out")
            .with_file("SETUP.md", String::new())
            .with_file("SETUP.md", String::new());

        assert!(matches!(plan.validate(), Err(DomainError::DuplicatePath { .. })));
    }

    #[test]
    fn rejects_absolute_paths() {
        let plan = OutputPlan::new("/tmp/out").with_file("/etc/passwd", String::new());
        assert!(matches!(
            plan.validate(),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(OutputPlan::new("/tmp/out").validate(), Err(DomainError::EmptyPlan));
    }
}
