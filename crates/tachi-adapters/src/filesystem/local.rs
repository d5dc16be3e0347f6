//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use tachi_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{TachiError, TachiResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> TachiResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> TachiResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn list_dir(&self, path: &Path) -> TachiResult<Vec<PathBuf>> {
        if !path.is_dir() {
            return Ok(Vec::new());
        }
        let mut names = std::fs::read_dir(path)
            .map_err(|e| map_io_error(path, e, "read directory"))?
            .map(|entry| entry.map(|e| PathBuf::from(e.file_name())))
            .collect::<io::Result<Vec<_>>>()
            .map_err(|e| map_io_error(path, e, "read directory"))?;
        names.sort();
        Ok(names)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> TachiError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_and_empty_directories_list_nothing() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();

        assert!(fs.list_dir(&tmp.path().join("missing")).unwrap().is_empty());
        assert!(fs.list_dir(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn entries_are_listed_by_name_in_order() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        fs.create_dir_all(&tmp.path().join(".git")).unwrap();
        fs.write_file(&tmp.path().join("tachi.yaml"), "name: demo").unwrap();

        assert_eq!(
            fs.list_dir(tmp.path()).unwrap(),
            [PathBuf::from(".git"), PathBuf::from("tachi.yaml")]
        );
    }

    #[test]
    fn write_into_missing_parent_names_the_path() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("nope/file.yaml");

        let err = LocalFilesystem::new().write_file(&target, "x").unwrap_err();
        assert!(err.to_string().contains("file.yaml"));
    }

    #[test]
    fn writes_and_creates() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let dir = tmp.path().join("a/b");
        fs.create_dir_all(&dir).unwrap();
        fs.write_file(&dir.join("c.txt"), "hello").unwrap();

        assert_eq!(std::fs::read_to_string(dir.join("c.txt")).unwrap(), "hello");
    }
}
