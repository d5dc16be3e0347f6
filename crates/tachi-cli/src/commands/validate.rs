//! Implementation of the `tachi validate` command.

use tracing::{info, instrument};

use tachi_adapters::project_to_yaml;
use tachi_core::{
    application::ApplicationError,
    domain::{Project, catalog},
    error::TachiError,
};

use crate::{cli::ValidateArgs, commands::generate, error::CliResult, output::OutputManager};

/// Load and validate a configuration file, reporting every problem at once.
#[instrument(skip_all, fields(config = %args.config.display()))]
pub fn execute(args: ValidateArgs, output: OutputManager) -> CliResult<()> {
    let project = generate::load(&args.config)?;

    let errors = project.validate();
    if !errors.is_empty() {
        return Err(TachiError::from(ApplicationError::InvalidConfiguration { errors }).into());
    }
    info!(project = %project.name, "Configuration is valid");

    output.success(&format!("{} is valid", args.config.display()))?;
    show_summary(&project, &output)?;

    if args.verbose {
        let yaml = project_to_yaml(&project).map_err(TachiError::from)?;
        output.print("")?;
        output.raw(&yaml)?;
    }

    Ok(())
}

fn show_summary(project: &Project, out: &OutputManager) -> CliResult<()> {
    let strategy = project.strategy().unwrap_or_default();
    let workflows: Vec<&str> = catalog::workflows_for_name(&project.strategy_name)
        .iter()
        .map(|w| w.id())
        .collect();
    let environments: Vec<&str> = catalog::environments_for(strategy)
        .iter()
        .map(|e| e.as_str())
        .collect();
    let services: Vec<&str> = project.services.iter().map(|s| s.name.as_str()).collect();

    out.print(&format!("  Project:      {}", project.name))?;
    out.print(&format!("  Strategy:     {strategy}"))?;
    out.print(&format!("  Workflows:    {}", workflows.join(", ")))?;
    out.print(&format!("  Environments: {}", environments.join(", ")))?;
    out.print(&format!("  Services:     {}", services.join(", ")))?;
    Ok(())
}
