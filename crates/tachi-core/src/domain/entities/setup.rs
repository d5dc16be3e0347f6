//! What a user must provision before the generated workflows can run.

use serde::Serialize;

use crate::domain::{
    catalog,
    entities::project::Project,
    value_objects::Environment,
};

/// A GitHub Actions secret referenced by the generated workflows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequiredSecret {
    pub name: &'static str,
    pub description: &'static str,

    /// Value the user should store, when it can be derived from the config.
    pub suggested_value: Option<String>,
}

impl RequiredSecret {
    fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            suggested_value: None,
        }
    }

    fn suggest(mut self, value: impl Into<String>) -> Self {
        self.suggested_value = Some(value.into());
        self
    }
}

/// One line of the services table in `SETUP.md`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceSummary {
    pub name: String,
    pub port: i64,
    pub external: bool,
    pub cpu: f64,
    pub memory: String,
    pub min_replicas: i64,
    pub max_replicas: i64,

    /// Container App names, one per active environment.
    pub app_names: Vec<String>,
}

/// Derived provisioning checklist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetupGuide {
    pub project: String,
    pub strategy: String,
    pub strategy_summary: &'static str,
    pub resource_group: String,
    pub registry: String,
    pub registry_login_server: String,
    pub container_apps_environment: String,
    pub location: String,
    pub environments: Vec<Environment>,

    /// Merges deploy staging and tags promote to production.
    pub includes_staging: bool,
    pub secrets: Vec<RequiredSecret>,
    pub services: Vec<ServiceSummary>,
}

impl SetupGuide {
    /// Derive the checklist from a validated project.
    pub fn derive(project: &Project) -> Self {
        let strategy = project.strategy().unwrap_or_default();
        let environments = catalog::environments_for(strategy).to_vec();

        Self {
            project: project.name.clone(),
            strategy: strategy.as_str().to_string(),
            strategy_summary: strategy.summary(),
            resource_group: project.azure.resource_group.clone(),
            registry: project.azure.registry.clone(),
            registry_login_server: project.azure.registry_login_server(),
            container_apps_environment: project.container_apps_environment(),
            location: project.azure.location.clone(),
            secrets: required_secrets(project),
            services: project
                .services
                .iter()
                .map(|svc| ServiceSummary {
                    name: svc.name.clone(),
                    port: svc.port,
                    external: svc.external,
                    cpu: svc.cpu,
                    memory: svc.memory.clone(),
                    min_replicas: svc.min_replicas,
                    max_replicas: svc.max_replicas,
                    app_names: environments
                        .iter()
                        .map(|env| svc.app_name(&project.name, *env))
                        .collect(),
                })
                .collect(),
            environments,
            includes_staging: catalog::includes_staging(strategy),
        }
    }
}

fn required_secrets(project: &Project) -> Vec<RequiredSecret> {
    let azure = &project.azure;
    let mut secrets = vec![
        RequiredSecret::new(
            "AZURE_CREDENTIALS",
            "Service principal JSON from `az ad sp create-for-rbac --sdk-auth`",
        ),
        RequiredSecret::new("AZURE_SUBSCRIPTION_ID", "Subscription that owns the resource group"),
        RequiredSecret::new("REGISTRY_LOGIN_SERVER", "Container registry login server")
            .suggest(azure.registry_login_server()),
        RequiredSecret::new("REGISTRY_USERNAME", "Container registry admin username")
            .suggest(azure.registry.clone()),
        RequiredSecret::new(
            "REGISTRY_PASSWORD",
            "Container registry admin password (`az acr credential show`)",
        ),
    ];

    if let Some(id) = &azure.log_analytics_workspace_id {
        secrets.push(
            RequiredSecret::new("LOG_ANALYTICS_WORKSPACE_ID", "Log Analytics workspace customer ID")
                .suggest(id.clone()),
        );
    }
    if azure.log_analytics_workspace_key.is_some() {
        secrets.push(RequiredSecret::new(
            "LOG_ANALYTICS_WORKSPACE_KEY",
            "Log Analytics workspace shared key",
        ));
    }

    secrets
}
