//! Generate Service - main application orchestrator.
//!
//! This service coordinates the whole generation workflow:
//! 1. Validate the project
//! 2. Select templates from the strategy catalog
//! 3. Render every file into an [`OutputPlan`]
//! 4. Guard the output directory, then write the plan

use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, RenderContext, TemplateRenderer},
    },
    domain::{
        AzureTarget, Environment, OutputPlan, Project, Service, SetupGuide, Strategy,
        catalog::{self, CONTAINER_APP_TEMPLATE, SETUP_TEMPLATE},
    },
    error::TachiResult,
};

/// Directory holding generated workflows, relative to the output root.
pub const WORKFLOWS_DIR: &str = ".github/workflows";

/// Directory holding per-environment container configs.
pub const CONTAINER_CONFIGS_DIR: &str = "container-apps/configs";

/// Setup document written at the output root.
pub const SETUP_FILE: &str = "SETUP.md";

/// How `generate` treats the output directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Render and return the plan without touching the filesystem.
    pub dry_run: bool,
    /// Write even when the output directory already has content.
    pub force: bool,
    /// Entry names in the output root that do not count as existing content,
    /// such as a configuration file saved by the same run.
    pub ignored_entries: Vec<PathBuf>,
}

/// Outcome of a `generate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub plan: OutputPlan,
    /// `false` for dry runs.
    pub written: bool,
}

impl GenerationReport {
    /// Output files relative to the output root, in write order.
    pub fn files(&self) -> Vec<&Path> {
        self.plan.files().map(|f| f.path.as_path()).collect()
    }

    pub fn setup_path(&self) -> PathBuf {
        self.plan.root().join(SETUP_FILE)
    }
}

/// Main generation service.
pub struct GenerateService {
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl GenerateService {
    /// Create a new generate service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use tachi_core::application::GenerateService;
    ///
    /// let service = GenerateService::new(
    ///     Box::new(renderer),   // impl TemplateRenderer
    ///     Box::new(filesystem), // impl Filesystem
    /// );
    /// ```
    pub fn new(renderer: Box<dyn TemplateRenderer>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            renderer,
            filesystem,
        }
    }

    /// Render everything a generation would write, without writing it.
    #[instrument(skip_all, fields(project = %project.name, output = %output_root.display()))]
    pub fn plan(&self, project: &Project, output_root: &Path) -> TachiResult<OutputPlan> {
        let errors = project.validate();
        if !errors.is_empty() {
            debug!(count = errors.len(), "Validation failed");
            return Err(ApplicationError::InvalidConfiguration { errors }.into());
        }

        let strategy = project.strategy().unwrap_or_default();
        let environments = catalog::environments_for(strategy);
        let workflows = catalog::workflows_for(strategy);
        info!(%strategy, workflows = workflows.len(), "Planning output");

        let mut plan = OutputPlan::new(output_root);
        plan.add_directory(WORKFLOWS_DIR);
        for env in environments {
            plan.add_directory(configs_dir(*env));
        }

        let context = workflow_context(project, strategy);
        for workflow in workflows {
            let content = self.renderer.render(&workflow.template_name(), &context)?;
            plan.add_file(
                Path::new(WORKFLOWS_DIR).join(workflow.output_file_name()),
                content,
            );
        }

        for env in environments {
            for service in &project.services {
                let context = container_context(project, service, *env);
                let content = self.renderer.render(CONTAINER_APP_TEMPLATE, &context)?;
                plan.add_file(
                    configs_dir(*env).join(format!("{}.yaml", service.name)),
                    content,
                );
            }
        }

        let guide = SetupGuide::derive(project);
        let content = self
            .renderer
            .render(SETUP_TEMPLATE, &RenderContext::from_serialize(&guide)?)?;
        plan.add_file(SETUP_FILE, content);

        plan.validate()?;
        debug!(entries = plan.entry_count(), "Plan ready");
        Ok(plan)
    }

    /// Validate, render and write.
    ///
    /// A dry run returns the plan without checking or touching the output
    /// directory. Otherwise a non-empty output directory is a conflict
    /// unless `force` is set. Files written before a failure stay in place.
    #[instrument(skip_all, fields(project = %project.name, dry_run = options.dry_run, force = options.force))]
    pub fn generate(
        &self,
        project: &Project,
        output_root: &Path,
        options: GenerateOptions,
    ) -> TachiResult<GenerationReport> {
        let plan = self.plan(project, output_root)?;

        if options.dry_run {
            info!("Dry run, nothing written");
            return Ok(GenerationReport {
                plan,
                written: false,
            });
        }

        if !options.force {
            self.guard_output(output_root, &options.ignored_entries)?;
        }

        self.write_plan(&plan)?;
        info!(files = plan.files().count(), "Generation complete");

        Ok(GenerationReport {
            plan,
            written: true,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Any entry not listed in `ignored` is a conflict.
    fn guard_output(&self, output_root: &Path, ignored: &[PathBuf]) -> TachiResult<()> {
        let existing = self.filesystem.list_dir(output_root)?;
        if let Some(entry) = existing.iter().find(|e| !ignored.contains(e)) {
            debug!(entry = %entry.display(), "Output directory has content");
            return Err(ApplicationError::OutputConflict {
                path: output_root.to_path_buf(),
            }
            .into());
        }
        Ok(())
    }

    /// Directories first, then files, in plan order.
    fn write_plan(&self, plan: &OutputPlan) -> TachiResult<()> {
        let root = plan.root();
        self.filesystem.create_dir_all(root)?;

        for dir in plan.directories() {
            self.filesystem.create_dir_all(&root.join(&dir.path))?;
        }

        for file in plan.files() {
            let path = root.join(&file.path);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, &file.content)?;
            debug!(path = %path.display(), bytes = file.size(), "Wrote file");
        }

        Ok(())
    }
}

fn configs_dir(environment: Environment) -> PathBuf {
    Path::new(CONTAINER_CONFIGS_DIR).join(environment.as_str())
}

fn project_value(project: &Project) -> Value {
    json!({
        "name": project.name,
        "container_apps_environment": project.container_apps_environment(),
    })
}

fn azure_value(azure: &AzureTarget) -> Value {
    json!({
        "resource_group": azure.resource_group,
        "registry": azure.registry,
        "login_server": azure.registry_login_server(),
        "location": azure.location,
        "log_analytics_workspace_id": azure.log_analytics_workspace_id,
        "log_analytics_workspace_key": azure.log_analytics_workspace_key,
        "has_log_analytics": azure.has_log_analytics(),
    })
}

/// `{ environment: { service: container_app_name } }` for every active environment.
fn app_names(project: &Project, environments: &[Environment]) -> Value {
    environments
        .iter()
        .map(|env| {
            let names = project
                .services
                .iter()
                .map(|svc| (svc.name.clone(), Value::from(svc.app_name(&project.name, *env))))
                .collect::<serde_json::Map<_, _>>();
            (env.as_str().to_string(), Value::Object(names))
        })
        .collect::<serde_json::Map<_, _>>()
        .into()
}

fn workflow_context(project: &Project, strategy: Strategy) -> RenderContext {
    let environments = catalog::environments_for(strategy);
    RenderContext::new(json!({
        "project": project_value(project),
        "azure": azure_value(&project.azure),
        "services": project.services,
        "strategy": strategy.as_str(),
        "environments": environments.iter().map(Environment::as_str).collect::<Vec<_>>(),
        "app_names": app_names(project, environments),
    }))
}

fn container_context(project: &Project, service: &Service, environment: Environment) -> RenderContext {
    RenderContext::new(json!({
        "project": project_value(project),
        "azure": azure_value(&project.azure),
        "service": service,
        "environment": environment.as_str(),
        "app_name": service.app_name(&project.name, environment),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_context_exposes_documented_keys() {
        let project = Project::new("demo", Strategy::TrunkReleaseStage, AzureTarget::new("rg", "acr"))
            .with_service(Service::new("web"));
        let ctx = workflow_context(&project, Strategy::TrunkReleaseStage);

        for key in ["project", "azure", "services", "strategy", "environments"] {
            assert!(ctx.get(key).is_some(), "missing {key}");
        }
        assert_eq!(ctx.get("environments"), Some(&json!(["staging", "production"])));
        assert_eq!(ctx.as_value()["azure"]["login_server"], "acr.azurecr.io");
        assert_eq!(ctx.as_value()["azure"]["log_analytics_workspace_id"], Value::Null);
        assert_eq!(ctx.as_value()["app_names"]["staging"]["web"], "demo-web-staging");
        assert_eq!(ctx.as_value()["app_names"]["production"]["web"], "demo-web");
    }

    #[test]
    fn container_context_names_the_app() {
        let project = Project::new("demo", Strategy::TrunkDirect, AzureTarget::new("rg", "acr"));
        let ctx = container_context(&project, &Service::new("api"), Environment::Staging);
        assert_eq!(ctx.get("app_name"), Some(&json!("demo-api-staging")));
        assert_eq!(ctx.get("environment"), Some(&json!("staging")));
        assert_eq!(ctx.as_value()["service"]["port"], 8000);
    }

    #[test]
    fn report_lists_files_in_order() {
        let plan = OutputPlan::new("/out")
            .with_directory(WORKFLOWS_DIR)
            .with_file(".github/workflows/a.yaml", "a".into())
            .with_file(SETUP_FILE, "b".into());
        let report = GenerationReport { plan, written: false };
        assert_eq!(
            report.files(),
            [Path::new(".github/workflows/a.yaml"), Path::new("SETUP.md")]
        );
        assert_eq!(report.setup_path(), Path::new("/out/SETUP.md"));
    }
}
