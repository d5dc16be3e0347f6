//! The configuration model: `Project`, `AzureTarget`, `Service`.
//!
//! These records hold parsed user intent with every documented default
//! applied. They carry no behaviour beyond naming helpers and
//! [`Project::validate`] / [`Service::validate`], which delegate to the
//! pure functions in `domain::validation`.
//!
//! # Strategy as written
//!
//! `Project::strategy` keeps the raw string from the document. An unknown
//! value must surface as a *validation* error listed alongside every other
//! problem, not as a parse failure that hides them. Typed access goes
//! through [`Project::strategy`].

use serde::{Deserialize, Serialize};

use crate::domain::{
    validation::{self, ValidationError},
    value_objects::{Environment, Strategy},
};

/// Documented defaults for every optional field.
pub mod defaults {
    pub const DOCKERFILE: &str = "Dockerfile";
    pub const PORT: i64 = 8000;
    pub const EXTERNAL: bool = true;
    pub const CPU: f64 = 0.25;
    pub const MEMORY: &str = "0.5Gi";
    pub const MIN_REPLICAS: i64 = 1;
    pub const MAX_REPLICAS: i64 = 10;
    pub const CONTEXT: &str = ".";
    pub const LOCATION: &str = "eastus";
}

// ── Project ───────────────────────────────────────────────────────────────────

/// Root aggregate: one deployable project with its Azure target and services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Used as the prefix of every Azure resource name.
    pub name: String,

    /// Deployment strategy exactly as written in the configuration.
    #[serde(rename = "strategy")]
    pub strategy_name: String,

    pub azure: AzureTarget,

    #[serde(default)]
    pub services: Vec<Service>,
}

impl Project {
    pub fn new(name: impl Into<String>, strategy: Strategy, azure: AzureTarget) -> Self {
        Self {
            name: name.into(),
            strategy_name: strategy.as_str().to_string(),
            azure,
            services: Vec::new(),
        }
    }

    pub fn with_service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    /// The typed strategy, or `None` when the configured value is unknown.
    pub fn strategy(&self) -> Option<Strategy> {
        self.strategy_name.parse().ok()
    }

    /// Name of the shared Container Apps environment.
    pub fn container_apps_environment(&self) -> String {
        format!("{}-env", self.name)
    }

    /// Validate the whole project, aggregating every service's errors.
    ///
    /// Never fails: an empty list means the project is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        validation::validate_project(self)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ── AzureTarget ───────────────────────────────────────────────────────────────

/// Where the project deploys.
///
/// The log-analytics fields may hold `${VAR}` placeholders. They are passed
/// through verbatim; the workflow runner resolves them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AzureTarget {
    pub resource_group: String,

    /// Azure Container Registry name, without the `.azurecr.io` suffix.
    pub registry: String,

    #[serde(default = "default_location")]
    pub location: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_analytics_workspace_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_analytics_workspace_key: Option<String>,
}

impl AzureTarget {
    pub fn new(resource_group: impl Into<String>, registry: impl Into<String>) -> Self {
        Self {
            resource_group: resource_group.into(),
            registry: registry.into(),
            location: default_location(),
            log_analytics_workspace_id: None,
            log_analytics_workspace_key: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_log_analytics(mut self, workspace_id: impl Into<String>, key: impl Into<String>) -> Self {
        self.log_analytics_workspace_id = Some(workspace_id.into());
        self.log_analytics_workspace_key = Some(key.into());
        self
    }

    pub fn registry_login_server(&self) -> String {
        format!("{}.azurecr.io", self.registry)
    }

    pub fn has_log_analytics(&self) -> bool {
        self.log_analytics_workspace_id.is_some() || self.log_analytics_workspace_key.is_some()
    }
}

// ── Service ───────────────────────────────────────────────────────────────────

/// One containerized deployable unit.
///
/// Integer fields are signed so that out-of-range input reaches
/// validation instead of failing the parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,

    #[serde(default = "default_dockerfile")]
    pub dockerfile: String,

    #[serde(default = "default_port")]
    pub port: i64,

    #[serde(default = "default_external")]
    pub external: bool,

    #[serde(default = "default_cpu")]
    pub cpu: f64,

    #[serde(default = "default_memory")]
    pub memory: String,

    #[serde(default = "default_min_replicas")]
    pub min_replicas: i64,

    #[serde(default = "default_max_replicas")]
    pub max_replicas: i64,

    #[serde(default = "default_context")]
    pub context: String,
}

impl Service {
    /// A service with every optional field at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dockerfile: default_dockerfile(),
            port: defaults::PORT,
            external: defaults::EXTERNAL,
            cpu: defaults::CPU,
            memory: default_memory(),
            min_replicas: defaults::MIN_REPLICAS,
            max_replicas: defaults::MAX_REPLICAS,
            context: default_context(),
        }
    }

    pub fn with_port(mut self, port: i64) -> Self {
        self.port = port;
        self
    }

    pub fn with_cpu(mut self, cpu: f64) -> Self {
        self.cpu = cpu;
        self
    }

    pub fn with_memory(mut self, memory: impl Into<String>) -> Self {
        self.memory = memory.into();
        self
    }

    pub fn with_replicas(mut self, min: i64, max: i64) -> Self {
        self.min_replicas = min;
        self.max_replicas = max;
        self
    }

    /// Container App name for this service in `environment`.
    pub fn app_name(&self, project: &str, environment: Environment) -> String {
        format!("{project}-{}{}", self.name, environment.name_suffix())
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        validation::validate_service(self)
    }
}

fn default_dockerfile() -> String {
    defaults::DOCKERFILE.to_string()
}
fn default_port() -> i64 {
    defaults::PORT
}
fn default_external() -> bool {
    defaults::EXTERNAL
}
fn default_cpu() -> f64 {
    defaults::CPU
}
fn default_memory() -> String {
    defaults::MEMORY.to_string()
}
fn default_min_replicas() -> i64 {
    defaults::MIN_REPLICAS
}
fn default_max_replicas() -> i64 {
    defaults::MAX_REPLICAS
}
fn default_context() -> String {
    defaults::CONTEXT.to_string()
}
fn default_location() -> String {
    defaults::LOCATION.to_string()
}
