//! Reading and writing the project configuration file.

use std::io;
use std::path::{Path, PathBuf};

use tachi_core::domain::{DomainError, Project};
use thiserror::Error;
use tracing::debug;

/// Failure to get a [`Project`] from, or onto, disk.
#[derive(Debug, Error)]
pub enum ProjectFileError {
    #[error("Configuration file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Document(#[from] DomainError),
}

/// Parse a project from YAML text, applying every documented default.
///
/// The strategy is kept as written; unknown values surface later through
/// validation.
pub fn parse_project(source: &str) -> Result<Project, DomainError> {
    let document: serde_yaml::Value = serde_yaml::from_str(source).map_err(invalid_document)?;
    if document.is_null() {
        return Err(DomainError::EmptyDocument);
    }
    serde_yaml::from_str(source).map_err(invalid_document)
}

/// Read and parse a project configuration file.
pub fn load_project(path: &Path) -> Result<Project, ProjectFileError> {
    let source = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ProjectFileError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ProjectFileError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    debug!(path = %path.display(), bytes = source.len(), "Loaded configuration");
    Ok(parse_project(&source)?)
}

/// Serialize a project back to YAML.
///
/// Unset log-analytics keys are omitted, so load, save and load again yields
/// the same project.
pub fn project_to_yaml(project: &Project) -> Result<String, DomainError> {
    serde_yaml::to_string(project).map_err(invalid_document)
}

/// Write a project configuration file, replacing any existing one.
pub fn save_project(project: &Project, path: &Path) -> Result<(), ProjectFileError> {
    let yaml = project_to_yaml(project)?;
    std::fs::write(path, yaml).map_err(|source| ProjectFileError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn invalid_document(e: serde_yaml::Error) -> DomainError {
    DomainError::InvalidDocument {
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tachi_core::domain::Strategy;

    const MINIMAL: &str = r#"
name: demo
strategy: trunk-direct
azure:
  resource_group: demo-rg
  registry: demoacr
services:
  - name: web
    port: 3000
"#;

    #[test]
    fn minimal_document_gets_defaults() {
        let project = parse_project(MINIMAL).unwrap();
        assert_eq!(project.strategy(), Some(Strategy::TrunkDirect));
        assert_eq!(project.azure.location, "eastus");

        let web = &project.services[0];
        assert_eq!(web.port, 3000);
        assert_eq!(web.dockerfile, "Dockerfile");
        assert_eq!(web.memory, "0.5Gi");
        assert!(project.is_valid());
    }

    #[test]
    fn out_of_range_values_reach_validation() {
        let source = MINIMAL.replace("port: 3000", "port: 70000\n    min_replicas: -1");
        let project = parse_project(&source).unwrap();
        assert_eq!(project.services[0].port, 70000);
        assert_eq!(project.services[0].min_replicas, -1);
        assert!(!project.is_valid());
    }

    #[test]
    fn empty_and_comment_only_documents_are_rejected() {
        assert_eq!(parse_project(""), Err(DomainError::EmptyDocument));
        assert_eq!(parse_project("# nothing\n"), Err(DomainError::EmptyDocument));
    }

    #[test]
    fn missing_required_field_is_described() {
        let err = parse_project("name: demo\nstrategy: trunk-direct\n").unwrap_err();
        assert!(err.to_string().contains("missing field `azure`"), "{err}");
    }

    #[test]
    fn wrong_type_is_described() {
        let source = MINIMAL.replace("port: 3000", "port: high");
        let err = parse_project(&source).unwrap_err();
        assert!(err.to_string().contains("invalid type"), "{err}");
    }

    #[test]
    fn placeholders_pass_through() {
        let source = MINIMAL.replace(
            "  registry: demoacr",
            "  registry: demoacr\n  log_analytics_workspace_id: ${LOG_ANALYTICS_WORKSPACE_ID}",
        );
        let project = parse_project(&source).unwrap();
        assert_eq!(
            project.azure.log_analytics_workspace_id.as_deref(),
            Some("${LOG_ANALYTICS_WORKSPACE_ID}")
        );
    }

    #[test]
    fn unset_log_analytics_is_omitted_on_save() {
        let yaml = project_to_yaml(&parse_project(MINIMAL).unwrap()).unwrap();
        assert!(!yaml.contains("log_analytics"));
        assert!(yaml.contains("strategy: trunk-direct"));
    }
}
