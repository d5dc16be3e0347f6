//! Implementation of the `tachi generate` command.
//!
//! Responsibility: obtain a `Project` (file or prompts), call the core
//! generate service, and display results. No business logic lives here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use tachi_adapters::{JinjaRenderer, LocalFilesystem, load_project, save_project};
use tachi_core::{
    application::{GenerateOptions, GenerateService, GenerationReport},
    domain::Project,
};

use crate::{
    cli::GenerateArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    interactive,
    output::OutputManager,
};

/// Execute the `tachi generate` command.
///
/// Dispatch sequence:
/// 1. Load the configuration file, or run the interactive session
/// 2. Resolve the output directory
/// 3. Validate, render and write via `GenerateService`
/// 4. Print the file list and point at `SETUP.md`
#[instrument(skip_all, fields(config = ?args.config, dry_run = args.dry_run, force = args.force))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let (project, saved_to) = match &args.config {
        Some(path) => (load(path)?, None),
        None => match prompt_for_project(&config, &output)? {
            Some(answers) => answers,
            None => return Ok(()),
        },
    };

    let output_root = resolve_output_dir(args.output, &config);
    debug!(output = %output_root.display(), "Output directory resolved");

    if args.force && !args.dry_run {
        output.warning("--force: existing files with the same names will be overwritten")?;
    }

    let options = GenerateOptions {
        dry_run: args.dry_run,
        force: args.force,
        ignored_entries: saved_to
            .as_deref()
            .and_then(|saved| entry_within(saved, &output_root))
            .into_iter()
            .collect(),
    };
    generate_project(&project, &output_root, options, &output)
}

fn generate_project(
    project: &Project,
    output_root: &Path,
    options: GenerateOptions,
    output: &OutputManager,
) -> CliResult<()> {
    let service = GenerateService::new(
        Box::new(JinjaRenderer::new()?),
        Box::new(LocalFilesystem::new()),
    );

    let report = service.generate(project, output_root, options)?;
    info!(project = %project.name, written = report.written, "Generate finished");

    if report.written {
        show_written(&report, output)
    } else {
        show_preview(&report, output)
    }
}

/// Read and parse a project configuration file.
pub fn load(path: &Path) -> CliResult<Project> {
    load_project(path).map_err(|e| CliError::project_file(e, path))
}

/// Run the interactive session and save the answers if asked.
///
/// Returns the project and where it was saved, or `None` when the user
/// declined generating now.
fn prompt_for_project(
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<Option<(Project, Option<PathBuf>)>> {
    let mut prompter = interactive::terminal_prompter()?;
    output.header("New tachi configuration")?;

    let outcome = interactive::run_session(prompter.as_mut(), config)?;

    if let Some(path) = &outcome.save_to {
        save_project(&outcome.project, path).map_err(|e| CliError::project_file(e, path))?;
        output.success(&format!("Saved configuration to {}", path.display()))?;
    }

    if !outcome.generate {
        output.info("Nothing generated")?;
        if let Some(path) = &outcome.save_to {
            output.print(&format!("  Run later: tachi generate --config {}", path.display()))?;
        }
        return Ok(None);
    }

    Ok(Some((outcome.project, outcome.save_to)))
}

/// `--output` (or `TACHI_OUTPUT_DIR`), then the settings file, then `.`.
fn resolve_output_dir(flag: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    flag.or_else(|| config.defaults.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Name of `file` when it sits directly inside `dir`.
///
/// A configuration saved into the output directory by the same run is not
/// existing content.
fn entry_within(file: &Path, dir: &Path) -> Option<PathBuf> {
    let parent = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let same_dir = std::fs::canonicalize(parent).ok()? == std::fs::canonicalize(dir).ok()?;
    if same_dir {
        file.file_name().map(PathBuf::from)
    } else {
        None
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_written(report: &GenerationReport, out: &OutputManager) -> CliResult<()> {
    let files = report.files();
    out.success(&format!(
        "Generated {} files in {}",
        files.len(),
        report.plan.root().display()
    ))?;
    for file in files {
        out.print(&format!("  {}", file.display()))?;
    }
    out.print("")?;
    out.info(&format!(
        "Next: provision the secrets and resources listed in {}",
        report.setup_path().display()
    ))?;
    Ok(())
}

fn show_preview(report: &GenerationReport, out: &OutputManager) -> CliResult<()> {
    out.header(&format!(
        "Dry run: would write to {}",
        report.plan.root().display()
    ))?;
    for dir in report.plan.directories() {
        out.print(&format!("  {}/", dir.path.display()))?;
    }
    for file in report.plan.files() {
        out.print(&format!("  {} ({} bytes)", file.path.display(), file.size()))?;
    }
    out.info("Nothing was written")?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
